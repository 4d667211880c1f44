//! Configuration schema definitions.
//!
//! A configuration describes default authentication info and a static set of
//! mounted providers, each backed by an in-memory resource tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::provider::{AuthType, AuthenticationInfo, ProviderInfo, PASSWORD, USER};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use sling::config::{Config, MountConfig};
///
/// let config: Config = serde_yaml::from_str(
///     "mounts:\n  - root: /\n    auth: required\n  - root: /apps\n",
/// )
/// .unwrap();
///
/// assert_eq!(config.mounts.as_ref().unwrap().len(), 2);
/// assert_eq!(config.mounts.unwrap()[1], MountConfig::new("/apps"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default authentication info for resolvers.
    pub auth: Option<AuthConfig>,

    /// Mounted providers.
    pub mounts: Option<Vec<MountConfig>>,
}

impl Config {
    /// Returns the configured authentication info.
    #[must_use]
    pub fn auth_info(&self) -> AuthenticationInfo {
        let mut info = AuthenticationInfo::new();
        if let Some(auth) = &self.auth {
            if let Some(user) = &auth.user {
                info.insert(USER.to_string(), user.clone());
            }
            if let Some(password) = &auth.password {
                info.insert(PASSWORD.to_string(), password.clone());
            }
        }
        info
    }
}

/// Default credentials handed to providers on login.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// User name.
    pub user: Option<String>,

    /// Password.
    pub password: Option<String>,
}

/// A provider mounted at a root path.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MountConfig {
    /// Absolute, normalized mount root.
    pub root: String,

    /// Descriptive name used in diagnostics.
    pub name: Option<String>,

    /// Authentication requirement (`no`, `required` or `lazy`).
    pub auth: Option<AuthType>,

    /// Ranking among providers sharing the root; higher wins.
    pub ranking: Option<i32>,

    /// Whether the provider contributes resolver attributes.
    pub attributes: Option<bool>,

    /// Users allowed to log in; everyone when absent.
    pub allowed_users: Option<Vec<String>>,

    /// Resources served by the mount.
    pub resources: Option<Vec<ResourceConfig>>,
}

impl MountConfig {
    /// Creates a mount with nothing but a root.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: None,
            auth: None,
            ranking: None,
            attributes: None,
            allowed_users: None,
            resources: None,
        }
    }

    /// Returns the registration metadata for the mount.
    #[must_use]
    pub fn provider_info(&self) -> ProviderInfo {
        let mut info = ProviderInfo::new(self.root.clone())
            .with_auth_type(self.auth.unwrap_or_default())
            .with_ranking(self.ranking.unwrap_or(0))
            .with_attributes(self.attributes.unwrap_or(false));
        if let Some(name) = &self.name {
            info = info.with_name(name.clone());
        }
        info
    }
}

/// A resource in a mount's static tree.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Absolute path, inside the mount root.
    pub path: String,

    /// Resource type; `nt:unstructured` when absent.
    pub resource_type: Option<String>,

    /// Resource super type.
    pub resource_super_type: Option<String>,

    /// String properties.
    pub properties: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
auth:
  user: admin
  password: secret
mounts:
  - root: /
    name: root
    auth: required
    ranking: 5
    attributes: true
    allowed_users: [admin]
    resources:
      - path: /something
        resource_type: sample/type
        resource_super_type: sample/base
        properties: { title: Something }
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let mount = &config.mounts.as_ref().unwrap()[0];
        assert_eq!(mount.auth, Some(AuthType::Required));
        assert_eq!(mount.ranking, Some(5));
        let resource = &mount.resources.as_ref().unwrap()[0];
        assert_eq!(resource.resource_type.as_deref(), Some("sample/type"));
        assert_eq!(
            resource.properties.as_ref().unwrap()["title"],
            "Something"
        );

        let info = config.auth_info();
        assert_eq!(info[USER], "admin");
        assert_eq!(info[PASSWORD], "secret");
    }

    #[test]
    fn test_none_is_accepted_for_auth() {
        let mount: MountConfig = serde_yaml::from_str("root: /\nauth: none\n").unwrap();
        assert_eq!(mount.auth, Some(AuthType::No));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_yaml::from_str::<Config>("mount: []\n").is_err());
        assert!(serde_yaml::from_str::<MountConfig>("root: /\npath: /x\n").is_err());
        assert!(serde_yaml::from_str::<MountConfig>("root: /\nauth: sometimes\n").is_err());
    }

    #[test]
    fn test_provider_info_defaults() {
        let info = MountConfig::new("/apps").provider_info();
        assert_eq!(info.root(), "/apps");
        assert_eq!(info.auth_type(), AuthType::No);
        assert_eq!(info.ranking(), 0);
        assert!(!info.is_attributable());
        assert_eq!(info.display_name(), "/apps");
    }

    #[test]
    fn test_empty_auth_info() {
        assert!(Config::default().auth_info().is_empty());
    }
}
