//! Bounded retry of operations that hit a busy database.

use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

const BACKOFF_STEP: Duration = Duration::from_millis(25);

/// Runs `op`, retrying up to `retries` more times while it fails with a
/// transient (busy/locked) database error.
///
/// Business-rule errors and other failures are returned at once. If every
/// attempt is transient, the result is [`Error::LockTimeout`] carrying
/// `lock_wait_seconds`.
///
/// # Errors
///
/// Returns the first non-transient error, or `LockTimeout` after the last
/// transient one.
///
/// # Examples
///
/// ```
/// use innkeep::{retry_transient, Error};
///
/// let mut calls = 0;
/// let result: innkeep::Result<()> = retry_transient(3, 5, || {
///     calls += 1;
///     Err(Error::Conflict { details: "taken".into() })
/// });
/// assert!(matches!(result, Err(Error::Conflict { .. })));
/// assert_eq!(calls, 1);
/// ```
pub fn retry_transient<T, F>(retries: u32, lock_wait_seconds: u64, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut attempt = 0;
    loop {
        match op() {
            Err(e) if e.is_transient() => {
                if attempt >= retries {
                    log::warn!("giving up after {} attempts: {e}", attempt + 1);
                    return Err(Error::LockTimeout {
                        seconds: lock_wait_seconds,
                    });
                }
                attempt += 1;
                log::debug!("transient database error, retry {attempt} of {retries}: {e}");
                thread::sleep(BACKOFF_STEP * attempt);
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn busy() -> Error {
        Error::Database(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_BUSY),
            Some("database is locked".into()),
        ))
    }

    #[test]
    fn test_success_first_time() {
        let result = retry_transient(3, 5, || Ok::<_, Error>(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_retries_then_succeeds() {
        let mut calls = 0;
        let result = retry_transient(3, 5, || {
            calls += 1;
            if calls < 3 {
                Err(busy())
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_exhaustion_is_lock_timeout() {
        let mut calls = 0;
        let result: Result<()> = retry_transient(2, 7, || {
            calls += 1;
            Err(busy())
        });
        assert!(matches!(result, Err(Error::LockTimeout { seconds: 7 })));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_business_errors_not_retried() {
        let mut calls = 0;
        let result: Result<()> = retry_transient(5, 5, || {
            calls += 1;
            Err(Error::PaymentRequired {
                details: "no payment".into(),
            })
        });
        assert!(matches!(result, Err(Error::PaymentRequired { .. })));
        assert_eq!(calls, 1);
    }
}
