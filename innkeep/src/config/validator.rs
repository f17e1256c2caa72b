//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Highest accepted `transient_retries`.
pub const MAX_TRANSIENT_RETRIES: u32 = 10;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_stay_nights: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.max_stay_nights == Some(0) {
            return Err(Error::Validation {
                field: "max_stay_nights".into(),
                message: "Must be at least 1".into(),
            });
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if let Some(retries) = config.transient_retries {
            if retries > MAX_TRANSIENT_RETRIES {
                return Err(Error::Validation {
                    field: "transient_retries".into(),
                    message: format!("Cannot exceed {MAX_TRANSIENT_RETRIES}"),
                });
            }
        }

        if config.confirmation_code_attempts == Some(0) {
            return Err(Error::Validation {
                field: "confirmation_code_attempts".into(),
                message: "Must be at least 1".into(),
            });
        }

        if let Some(ref currency) = config.currency {
            if currency.trim().is_empty() {
                return Err(Error::Validation {
                    field: "currency".into(),
                    message: "Cannot be empty or only whitespace".into(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(config: &Config) -> String {
        match ConfigValidator::validate(config) {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_is_valid() {
        ConfigValidator::validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            field_of(&Config {
                max_stay_nights: Some(0),
                ..Default::default()
            }),
            "max_stay_nights"
        );
        assert_eq!(
            field_of(&Config {
                transient_retries: Some(11),
                ..Default::default()
            }),
            "transient_retries"
        );
        assert_eq!(
            field_of(&Config {
                confirmation_code_attempts: Some(0),
                ..Default::default()
            }),
            "confirmation_code_attempts"
        );
        assert_eq!(
            field_of(&Config {
                currency: Some("  ".into()),
                ..Default::default()
            }),
            "currency"
        );
        assert_eq!(
            field_of(&Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            }),
            "maximum_lock_wait_seconds"
        );
    }

    #[test]
    fn test_edge_values_accepted() {
        ConfigValidator::validate(&Config {
            max_stay_nights: Some(1),
            transient_retries: Some(10),
            confirmation_code_attempts: Some(1),
            currency: Some("IDR".into()),
            ..Default::default()
        })
        .unwrap();
    }
}
