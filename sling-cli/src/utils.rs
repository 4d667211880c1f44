//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, resolver setup and output formatting.

use crate::cli::Cli;
use crate::error::CliError;
use clap::ValueEnum;
use serde::Serialize;
use sling::config::AuthConfig;
use sling::provider::ResourceProviderTracker;
use sling::{Config, ConfigBuilder, Resource, ResourceKind, ResourceResolver};
use std::io::Write;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
///
/// Verbosity is consumed by the logger before commands run.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Configuration file to use instead of discovery.
    pub config: Option<PathBuf>,

    /// User to open resolvers as.
    pub user: Option<String>,

    /// Password handed to providers.
    pub password: Option<String>,
}

impl GlobalOptions {
    /// Collect the global options from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            quiet: cli.quiet,
            config: cli.config.clone(),
            user: cli.user.clone(),
            password: cli.password.clone(),
        }
    }
}

/// Output format for commands printing a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files (the `--config` file replaces discovery)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    if global.user.is_some() || global.password.is_some() {
        builder = builder.with_config(Config {
            auth: Some(AuthConfig {
                user: global.user.clone(),
                password: global.password.clone(),
            }),
            mounts: None,
        });
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Mount the configured providers and open a resolver over them.
pub fn open_resolver(config: &Config) -> Result<ResourceResolver, CliError> {
    let tracker = ResourceProviderTracker::from_config(config)?;
    log::debug!("Mounted {} provider(s)", tracker.storage().len());
    Ok(ResourceResolver::new(tracker.storage(), config.auth_info())?)
}

/// Short label for a resource kind.
pub fn kind_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Real => "real",
        ResourceKind::Synthetic => "synthetic",
        ResourceKind::NonExisting => "non-existing",
    }
}

/// Write a resource as `key: value` lines.
pub fn write_resource(out: &mut impl Write, resource: &Resource) -> Result<(), CliError> {
    writeln!(out, "path: {}", resource.path())?;
    writeln!(out, "type: {}", resource.resource_type())?;
    if let Some(super_type) = resource.resource_super_type() {
        writeln!(out, "super type: {super_type}")?;
    }
    writeln!(out, "kind: {}", kind_label(resource.kind()))?;

    let metadata = resource.metadata();
    if let Some(ref resolution_path) = metadata.resolution_path {
        writeln!(out, "resolution path: {resolution_path}")?;
    }
    if let Some(ref info) = metadata.resolution_path_info {
        if !info.is_empty() {
            writeln!(out, "path info: {info}")?;
        }
    }
    if !metadata.parameters.is_empty() {
        writeln!(out, "parameters: {}", metadata.parameters)?;
    }
    if let Some(ref root) = metadata.provider_root {
        writeln!(out, "provider: {root}")?;
    }
    for (name, value) in resource.properties() {
        writeln!(out, "property {name}: {value}")?;
    }
    Ok(())
}

/// Write a value as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    writeln!(out)?;
    Ok(())
}

/// Write a resource to stdout in the requested format.
pub fn print_resource(resource: &Resource, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Text => write_resource(&mut handle, resource),
        OutputFormat::Json => write_json(&mut handle, resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_resource_text() {
        let mut resource = Resource::new("/content/page", "app/page").with_property("title", "Hi");
        let metadata = resource.metadata_mut();
        metadata.resolution_path = Some("/content/page".to_string());
        metadata.resolution_path_info = Some(".html".to_string());
        metadata.parameters.insert("v", "1");

        let mut out = Vec::new();
        write_resource(&mut out, &resource).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("path: /content/page\n"));
        assert!(text.contains("kind: real\n"));
        assert!(text.contains("path info: .html\n"));
        assert!(text.contains("parameters: ;v=1\n"));
        assert!(text.contains("property title: Hi\n"));
        assert!(!text.contains("provider:"));
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &Resource::synthetic("/some")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["path"], "/some");
        assert_eq!(value["kind"], "synthetic");
    }

    #[test]
    fn test_global_options_from_cli() {
        use clap::Parser;

        let cli = Cli::try_parse_from([
            "sling", "--verbose", "--quiet", "--user", "bob", "--config", "/tmp/s.yaml", "mounts",
        ])
        .unwrap();
        let global = GlobalOptions::from_cli(&cli);
        assert!(global.quiet);
        assert_eq!(global.user.as_deref(), Some("bob"));
        assert_eq!(global.password, None);
        assert_eq!(global.config, Some(PathBuf::from("/tmp/s.yaml")));
    }

    #[test]
    fn test_load_configuration_applies_user_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sling.yaml");
        std::fs::write(&path, "auth:\n  user: alice\nmounts:\n  - root: /\n").unwrap();

        let global = GlobalOptions {
            config: Some(path),
            user: Some("bob".to_string()),
            ..GlobalOptions::default()
        };
        let config = load_configuration(&global).unwrap();
        assert_eq!(config.auth.unwrap().user.as_deref(), Some("bob"));
    }
}
