//! Build script for sling-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("sling")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse request paths and resolve them against mounted resource providers")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this configuration file instead of discovering sling.yaml")
                .value_name("PATH")
                .global(true)
                .env("SLING_CONFIG"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("Open resolvers as this user")
                .value_name("USER")
                .global(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password handed to providers on login")
                .value_name("PASSWORD")
                .global(true),
        )
        .subcommands(vec![
            Command::new("parse")
                .about("Strip matrix parameters from request paths")
                .long_about("Show the cleaned path and the matrix parameters of each request path"),
            Command::new("resolve")
                .about("Resolve a request path to a resource")
                .long_about("Resolve a request path against the mounted providers, reporting the resolution path and path info"),
            Command::new("get")
                .about("Show the resource at an absolute path")
                .long_about("Look up a resource, including synthetic resources above mount points"),
            Command::new("ls")
                .about("List the children of a resource")
                .long_about("List the children of a resource merged from every contributing provider"),
            Command::new("mounts")
                .about("Show the mounted providers")
                .long_about("Show the mounted providers in the order lookups consult them"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a sling configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("sling.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
