//! Get command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_resolver, print_resource, GlobalOptions, OutputFormat};
use clap::Args;

/// Show the resource at an absolute path.
#[derive(Args)]
pub struct GetCommand {
    /// Absolute resource path
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut resolver = open_resolver(&config)?;

        let resource = resolver
            .get_resource(&self.path)?
            .ok_or_else(|| CliError::SemanticFailure(format!("No resource at {}", self.path)))?;
        print_resource(&resource, self.format)?;

        resolver.close()?;
        Ok(())
    }
}
