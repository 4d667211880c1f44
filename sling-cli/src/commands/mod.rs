//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `parse`: Strip matrix parameters from request paths
//! - `resolve`: Resolve a request path against the mounted providers
//! - `get`: Show the resource at an absolute path
//! - `ls`: List the children of a resource
//! - `mounts`: Show the mounted providers
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod get;
pub mod ls;
pub mod mounts;
pub mod parse;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use get::GetCommand;
pub use ls::LsCommand;
pub use mounts::MountsCommand;
pub use parse::ParseCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
