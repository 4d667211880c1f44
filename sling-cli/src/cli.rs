//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, GetCommand, LsCommand, MountsCommand, ParseCommand, ResolveCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting request path parsing and resource resolution.
#[derive(Parser)]
#[command(name = "sling")]
#[command(
    version,
    about = "Parse request paths and resolve them against mounted resource providers",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use this configuration file instead of discovering sling.yaml
    #[arg(long, value_name = "PATH", global = true, env = "SLING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Open resolvers as this user
    #[arg(long, value_name = "USER", global = true)]
    pub user: Option<String>,

    /// Password handed to providers on login
    #[arg(long, value_name = "PASSWORD", global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Strip matrix parameters from request paths
    Parse(ParseCommand),

    /// Resolve a request path to a resource
    Resolve(ResolveCommand),

    /// Show the resource at an absolute path
    Get(GetCommand),

    /// List the children of a resource
    Ls(LsCommand),

    /// Show the mounted providers
    Mounts(MountsCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
