//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from files, environment and code.
///
/// # Examples
///
/// ```
/// use sling::config::{Config, ConfigBuilder, MountConfig};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { mounts: Some(vec![MountConfig::new("/")]), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.mounts.unwrap()[0].root, "/");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Vec<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that discovers files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project configuration is discovered from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the directory the user configuration is read from.
    #[must_use]
    pub fn with_user_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Loads exactly this file instead of discovering configuration.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Adds a programmatic override with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Skips configuration files entirely.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips environment variable overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, the working
    /// directory cannot be determined, or the result fails validation.
    pub fn build(self) -> Result<Config> {
        let sources = self.load_sources()?;
        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config);
        }

        for config_override in &self.overrides {
            ConfigMerger::merge_into(&mut config, config_override);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    fn load_sources(&self) -> Result<Vec<ConfigSource>> {
        if self.skip_files {
            return Ok(Vec::new());
        }

        if let Some(path) = &self.config_file {
            let config = ConfigLoader::load_file(path)?;
            return Ok(vec![ConfigSource {
                path: path.clone(),
                precedence: 2,
                config,
            }]);
        }

        let working_dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        ConfigLoader::load_all(&working_dir, self.user_dir.as_deref())
    }
}
