//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger};
///
/// let low = Config { max_stay_nights: Some(30), ..Default::default() };
/// let high = Config { max_stay_nights: Some(14), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_stay_nights, Some(14));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target; every `Some` in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.max_stay_nights.is_some() {
            target.max_stay_nights = source.max_stay_nights;
        }

        if source.require_payment_at_check_in.is_some() {
            target.require_payment_at_check_in = source.require_payment_at_check_in;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.transient_retries.is_some() {
            target.transient_retries = source.transient_retries;
        }

        if source.confirmation_code_attempts.is_some() {
            target.confirmation_code_attempts = source.confirmation_code_attempts;
        }

        if source.currency.is_some() {
            target.currency.clone_from(&source.currency);
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
    }
}
