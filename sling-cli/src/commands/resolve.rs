//! Resolve command implementation.
//!
//! This module implements the `resolve` command, which resolves a request
//! path against the configured mounts the way a request would be.

use crate::error::CliError;
use crate::utils::{load_configuration, open_resolver, print_resource, GlobalOptions, OutputFormat};
use clap::Args;

/// Resolve a request path to a resource.
#[derive(Args)]
pub struct ResolveCommand {
    /// Request path, optionally with selectors, extension, suffix and matrix parameters
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,

    /// Fail with exit code 1 if the path does not resolve
    #[arg(long)]
    pub require: bool,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut resolver = open_resolver(&config)?;

        let resource = resolver.resolve(&self.path)?;
        print_resource(&resource, self.format)?;
        resolver.close()?;

        if self.require && resource.is_non_existing() {
            return Err(CliError::SemanticFailure(format!(
                "{} does not resolve",
                self.path
            )));
        }
        Ok(())
    }
}
