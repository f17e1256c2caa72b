//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `INNKEEP_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Overrides `max_stay_nights`.
pub const MAX_STAY_NIGHTS_ENV: &str = "INNKEEP_MAX_STAY_NIGHTS";
/// Overrides `require_payment_at_check_in`.
pub const REQUIRE_PAYMENT_ENV: &str = "INNKEEP_REQUIRE_PAYMENT";
/// Overrides `maximum_lock_wait_seconds`.
pub const LOCK_WAIT_ENV: &str = "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `transient_retries`.
pub const TRANSIENT_RETRIES_ENV: &str = "INNKEEP_TRANSIENT_RETRIES";
/// Overrides `currency`.
pub const CURRENCY_ENV: &str = "INNKEEP_CURRENCY";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "INNKEEP_DISABLE_AUTOINIT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric count or an unrecognised boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(MAX_STAY_NIGHTS_ENV) {
            config.max_stay_nights = Some(Self::parse_number(MAX_STAY_NIGHTS_ENV, &val)?);
        }

        if let Ok(val) = env::var(REQUIRE_PAYMENT_ENV) {
            config.require_payment_at_check_in = Some(Self::parse_bool(REQUIRE_PAYMENT_ENV, &val)?);
        }

        if let Ok(val) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(Self::parse_number(LOCK_WAIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(TRANSIENT_RETRIES_ENV) {
            config.transient_retries = Some(Self::parse_number(TRANSIENT_RETRIES_ENV, &val)?);
        }

        if let Ok(val) = env::var(CURRENCY_ENV) {
            config.currency = Some(val);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }

    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
