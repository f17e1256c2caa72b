//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment overrides
//! can be layered; the accessors on [`Config`] resolve the defaults.

use serde::{Deserialize, Serialize};

/// Default upper bound on the length of a stay.
pub const DEFAULT_MAX_STAY_NIGHTS: u32 = 365;

/// Default busy timeout in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Default number of retries for transient lock errors.
pub const DEFAULT_TRANSIENT_RETRIES: u32 = 3;

/// Default number of confirmation codes tried before giving up.
pub const DEFAULT_CODE_ATTEMPTS: u32 = 8;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use innkeep::config::Config;
///
/// let config = Config {
///     max_stay_nights: Some(30),
///     ..Default::default()
/// };
/// assert_eq!(config.max_stay_nights(), 30);
/// assert!(!config.require_payment_at_check_in());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Longest stay accepted by `create`, in nights.
    pub max_stay_nights: Option<u32>,

    /// Whether check-in requires some payment when the caller does not say.
    pub require_payment_at_check_in: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Retries for busy/locked database errors.
    pub transient_retries: Option<u32>,

    /// Confirmation codes tried before a create gives up.
    pub confirmation_code_attempts: Option<u32>,

    /// Currency label shown next to amounts.
    pub currency: Option<String>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Resolved maximum stay length.
    #[must_use]
    pub fn max_stay_nights(&self) -> u32 {
        self.max_stay_nights.unwrap_or(DEFAULT_MAX_STAY_NIGHTS)
    }

    /// Resolved default for the check-in payment gate.
    #[must_use]
    pub fn require_payment_at_check_in(&self) -> bool {
        self.require_payment_at_check_in.unwrap_or(false)
    }

    /// Resolved busy timeout in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Resolved transient retry count.
    #[must_use]
    pub fn transient_retries(&self) -> u32 {
        self.transient_retries.unwrap_or(DEFAULT_TRANSIENT_RETRIES)
    }

    /// Resolved confirmation code attempts.
    #[must_use]
    pub fn confirmation_code_attempts(&self) -> u32 {
        self.confirmation_code_attempts
            .unwrap_or(DEFAULT_CODE_ATTEMPTS)
    }

    /// Resolved autoinit switch.
    #[must_use]
    pub fn disable_autoinit(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}
