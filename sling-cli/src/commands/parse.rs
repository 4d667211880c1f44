//! Parse command implementation.
//!
//! This module implements the `parse` command, which strips matrix
//! parameters from request paths without consulting any provider.

use crate::error::CliError;
use crate::utils::{write_json, GlobalOptions, OutputFormat};
use clap::Args;
use sling::{ParsedPath, PathParser};
use std::io::Write;

/// Parse request paths and show their matrix parameters.
#[derive(Args)]
pub struct ParseCommand {
    /// Request paths to parse
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,
}

impl ParseCommand {
    /// Execute the parse command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let parsed: Vec<ParsedPath> = self.paths.iter().map(|p| PathParser::parse(p)).collect();

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match self.format {
            OutputFormat::Text => {
                for path in &parsed {
                    writeln!(handle, "{}", path.path())?;
                    for (name, value) in path.parameters().iter() {
                        writeln!(handle, "\t{name}={value}")?;
                    }
                }
            }
            OutputFormat::Json => write_json(&mut handle, &parsed)?,
        }

        Ok(())
    }
}
