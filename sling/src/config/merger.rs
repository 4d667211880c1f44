//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{AuthConfig, Config, MountConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use sling::config::{Config, ConfigMerger, MountConfig};
///
/// let low = Config { mounts: Some(vec![MountConfig::new("/")]), ..Default::default() };
/// let high = Config { mounts: Some(vec![MountConfig::new("/apps")]), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.mounts.unwrap().len(), 2);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - `auth`: field-by-field, source wins where set
    /// - `mounts`: keyed by root across sources; the source's mounts replace
    ///   every target mount sharing one of their roots and are appended in
    ///   order, so mounts sharing a root within one source all survive
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(source_auth) = &source.auth {
            Self::merge_auth(target.auth.get_or_insert_with(AuthConfig::default), source_auth);
        }

        if let Some(source_mounts) = &source.mounts {
            Self::merge_mounts(target.mounts.get_or_insert_with(Vec::new), source_mounts);
        }
    }

    fn merge_auth(target: &mut AuthConfig, source: &AuthConfig) {
        if source.user.is_some() {
            target.user.clone_from(&source.user);
        }
        if source.password.is_some() {
            target.password.clone_from(&source.password);
        }
    }

    fn merge_mounts(target: &mut Vec<MountConfig>, source: &[MountConfig]) {
        target.retain(|existing| !source.iter().any(|m| m.root == existing.root));
        target.extend(source.iter().cloned());
    }
}
