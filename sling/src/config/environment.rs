//! Environment variable handling for configuration overrides.

use std::env;

use crate::config::schema::Config;

/// Overrides the configured user name.
pub const USER_ENV: &str = "SLING_USER";

/// Overrides the configured password.
pub const PASSWORD_ENV: &str = "SLING_PASSWORD";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use sling::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config);
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `SLING_*` overrides to the configuration.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(config: &mut Config) {
        if let Some(user) = Self::read(USER_ENV) {
            config.auth.get_or_insert_with(Default::default).user = Some(user);
        }

        if let Some(password) = Self::read(PASSWORD_ENV) {
            config.auth.get_or_insert_with(Default::default).password = Some(password);
        }
    }

    fn read(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.is_empty())
    }
}
