//! Assembly of the effective configuration from every source.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from files, environment and overrides.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { max_stay_nights: Some(30), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.max_stay_nights(), 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory where the upward search for `innkeep.yaml` starts.
    /// Defaults to the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `INNKEEP_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Programmatic overrides, applied last.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merges the sources, lowest precedence first, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                log::debug!("loaded configuration from {}", source.path.display());
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{PROPERTY_CONFIG_FILE, USER_CONFIG_FILE};
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_property_file_beats_user_file() {
        let work = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(
            data.path().join(USER_CONFIG_FILE),
            "max_stay_nights: 60\ncurrency: USD\n",
        )
        .unwrap();
        fs::write(work.path().join(PROPERTY_CONFIG_FILE), "max_stay_nights: 14\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(work.path())
            .with_data_dir(data.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.max_stay_nights(), 14);
        assert_eq!(config.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_overrides_beat_files() {
        let work = TempDir::new().unwrap();
        fs::write(work.path().join(PROPERTY_CONFIG_FILE), "transient_retries: 2\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(work.path())
            .with_data_dir(work.path())
            .skip_env()
            .with_config(Config {
                transient_retries: Some(5),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.transient_retries(), 5);
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                transient_retries: Some(50),
                ..Default::default()
            })
            .build();

        assert!(matches!(result, Err(Error::Validation { .. })));
    }
}
