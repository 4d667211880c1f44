//! List command implementation.
//!
//! This module implements the `ls` command, which displays the children of
//! a resource in various formats (table, JSON, CSV).

use crate::error::CliError;
use crate::utils::{kind_label, load_configuration, open_resolver, write_json, GlobalOptions};
use clap::{Args, ValueEnum};
use sling::Resource;
use std::io::Write;

/// Column headers for table and CSV output.
const COLUMN_HEADERS: [&str; 4] = ["path", "type", "kind", "provider"];

/// List the children of a resource.
#[derive(Args)]
pub struct LsCommand {
    /// Absolute path of the parent resource
    #[arg(value_name = "PATH", default_value = "/")]
    pub path: String,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "SLING_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: ListFormat,

    /// Hide synthetic resources
    #[arg(long)]
    pub no_synthetic: bool,
}

/// Output format for listings.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ListFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl LsCommand {
    /// Execute the ls command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut resolver = open_resolver(&config)?;

        let parent = resolver
            .get_resource(&self.path)?
            .ok_or_else(|| CliError::SemanticFailure(format!("No resource at {}", self.path)))?;

        let mut children: Vec<Resource> = resolver.list_children(&parent)?.collect();
        if self.no_synthetic {
            children.retain(|c| !c.is_synthetic());
        }
        children.sort_by(|a, b| a.path().cmp(b.path()));

        match self.format {
            ListFormat::Table => format_as_table(&children)?,
            ListFormat::Json => write_json(&mut std::io::stdout().lock(), &children)?,
            ListFormat::Csv => format_as_csv(&children)?,
        }

        resolver.close()?;
        Ok(())
    }
}

fn row(resource: &Resource) -> [String; 4] {
    [
        resource.path().to_string(),
        resource.resource_type().to_string(),
        kind_label(resource.kind()).to_string(),
        resource
            .metadata()
            .provider_root
            .clone()
            .unwrap_or_default(),
    ]
}

/// Format children as a human-readable table.
fn format_as_table(children: &[Resource]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for child in children {
        let mut fields = row(child);
        if fields[3].is_empty() {
            fields[3] = "-".to_string();
        }
        writeln!(handle, "{}", fields.join("\t"))?;
    }

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format children as CSV.
fn format_as_csv(children: &[Resource]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for child in children {
        writer.write_record(row(child)).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}
