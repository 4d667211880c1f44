#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # sling
//!
//! Request path parsing and composed resource provider resolution.
//!
//! Resource providers are mounted at root paths and combined into one
//! logical resource tree. Request paths are cleaned of matrix parameters,
//! then resolved against that tree.
//!
//! ## Core Types
//!
//! - [`PathParser`], [`ParsedPath`] and [`Parameters`]: matrix-parameter
//!   extraction from request paths
//! - [`provider::ResourceProvider`]: the backing-store capability, mounted
//!   through a [`provider::ResourceProviderTracker`]
//! - [`ResourceResolver`]: a resolution session over the mounted providers
//! - [`Resource`]: the unit of addressable content
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use sling::PathParser;
//!
//! let parsed = PathParser::parse("/a/b;foo=bar.html/suffix");
//! assert_eq!(parsed.path(), "/a/b.html/suffix");
//! assert_eq!(parsed.parameters().get("foo"), Some("bar"));
//!
//! // Malformed parameters leave the path untouched
//! let parsed = PathParser::parse("/a.;x");
//! assert_eq!(parsed.path(), "/a.;x");
//! assert!(parsed.parameters().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod provider;
pub mod resolver;
pub mod resource;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, LogoutFailure, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{Parameters, ParsedPath, PathParser};
pub use resolver::ResourceResolver;
pub use resource::{Resource, ResourceKind, ResourceMetadata};
