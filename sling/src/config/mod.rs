//! Configuration system for sling.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of mount roots and resource paths
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SLING_USER`, `SLING_PASSWORD`)
//! 3. Private project config (`sling.local.yaml`)
//! 4. Project config (`sling.yaml`)
//! 5. User config (`~/.sling/config.yaml`)
//!
//! # Examples
//!
//! ```no_run
//! use sling::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//!
//! for mount in config.mounts.iter().flatten() {
//!     println!("{}", mount.root);
//! }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{AuthConfig, Config, MountConfig, ResourceConfig};
pub use validator::ConfigValidator;
