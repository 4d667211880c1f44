//! Mounts command implementation.
//!
//! This module implements the `mounts` command, which shows the configured
//! providers in the order lookups consult them.

use crate::error::CliError;
use crate::utils::{load_configuration, write_json, GlobalOptions};
use clap::Args;
use sling::provider::{ProviderInfo, ResourceProviderTracker};
use std::io::Write;

/// Show the mounted providers, most specific first.
#[derive(Args)]
pub struct MountsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl MountsCommand {
    /// Execute the mounts command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let tracker = ResourceProviderTracker::from_config(&config)?;
        let storage = tracker.storage();
        let infos: Vec<&ProviderInfo> = storage.handlers().iter().map(|h| h.info()).collect();

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        if self.json {
            return write_json(&mut handle, &infos);
        }

        if infos.is_empty() {
            if !global.quiet {
                eprintln!("No mounts configured");
            }
            return Ok(());
        }

        writeln!(handle, "ROOT\tNAME\tAUTH\tRANKING\tATTRIBUTES")?;
        for info in infos {
            writeln!(
                handle,
                "{}\t{}\t{}\t{}\t{}",
                info.root(),
                info.name().unwrap_or("-"),
                info.auth_type(),
                info.ranking(),
                if info.is_attributable() { "yes" } else { "no" },
            )?;
        }

        Ok(())
    }
}
