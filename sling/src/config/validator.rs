//! Configuration validation.

use std::collections::HashSet;

use crate::config::schema::{Config, MountConfig};
use crate::error::{Error, Result};
use crate::path::{normalize, PathRelationship};

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use sling::config::{Config, ConfigValidator, MountConfig};
///
/// let config = Config { mounts: Some(vec![MountConfig::new("/")]), ..Default::default() };
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { mounts: Some(vec![MountConfig::new("apps")]), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(auth) = &config.auth {
            if let Some(user) = &auth.user {
                Self::validate_identifier("auth.user", user)?;
            }
        }

        for (index, mount) in config.mounts.iter().flatten().enumerate() {
            Self::validate_mount(index, mount)?;
        }

        Ok(())
    }

    fn validate_mount(index: usize, mount: &MountConfig) -> Result<()> {
        let field = format!("mounts[{index}]");
        Self::validate_path(&format!("{field}.root"), &mount.root)?;

        if let Some(name) = &mount.name {
            Self::validate_identifier(&format!("{field}.name"), name)?;
        }

        for user in mount.allowed_users.iter().flatten() {
            Self::validate_identifier(&format!("{field}.allowed_users"), user)?;
        }

        let mut seen = HashSet::new();
        for (i, resource) in mount.resources.iter().flatten().enumerate() {
            let resource_field = format!("{field}.resources[{i}].path");
            Self::validate_path(&resource_field, &resource.path)?;

            if !PathRelationship::is_within(&resource.path, &mount.root) {
                return Err(Error::Validation {
                    field: resource_field,
                    message: format!("{} is outside mount root {}", resource.path, mount.root),
                });
            }

            if !seen.insert(resource.path.as_str()) {
                return Err(Error::Validation {
                    field: resource_field,
                    message: format!("duplicate resource {}", resource.path),
                });
            }

            if let Some(resource_type) = &resource.resource_type {
                Self::validate_identifier(&format!("{field}.resources[{i}].resource_type"), resource_type)?;
            }
        }

        Ok(())
    }

    /// Validate an absolute, normalized resource path.
    fn validate_path(field: &str, path: &str) -> Result<()> {
        if !normalize::is_absolute(path) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("{path:?} must be absolute"),
            });
        }
        if normalize::normalize(path).as_deref() != Some(path) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("{path:?} must be normalized"),
            });
        }
        Ok(())
    }

    fn validate_identifier(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }
        Ok(())
    }
}
