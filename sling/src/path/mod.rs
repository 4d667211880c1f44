//! Request and resource path handling.
//!
//! This module covers everything the resolver does with path strings before
//! a resource provider is consulted.
//!
//! # Key Concepts
//!
//! ## Matrix parameters
//!
//! A request path may carry a block of `;name=value` parameters, either
//! before the extension (`/a/b;foo=bar.html`) or after it
//! (`/a/b.html;foo=bar`). [`PathParser`] removes the block and returns the
//! parameters separately. Malformed blocks are not an error: the path is
//! returned unchanged and no parameters are reported.
//!
//! ## Normalization
//!
//! Resource paths are plain `/`-separated strings. [`normalize`] resolves
//! `.` and `..` segments and strips redundant separators.
//!
//! ## Resolution candidates
//!
//! [`ResourcePathIterator`] yields the resource paths a request path may
//! address, longest first.
//!
//! # Examples
//!
//! ```
//! use sling::path::{PathParser, PathRelationship, ResourcePathIterator};
//!
//! let parsed = PathParser::parse("/a/b;foo='bar,baz'.html");
//! assert_eq!(parsed.path(), "/a/b.html");
//! assert_eq!(parsed.parameters().get("foo"), Some("bar,baz"));
//!
//! let mut candidates = ResourcePathIterator::new(parsed.path());
//! assert_eq!(candidates.next().as_deref(), Some("/a/b.html"));
//! assert_eq!(candidates.next().as_deref(), Some("/a/b"));
//!
//! assert!(PathRelationship::is_within("/a/b", "/a"));
//! ```

pub mod iterator;
pub mod normalize;
pub mod parameters;
pub mod parser;
pub mod relationship;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use iterator::ResourcePathIterator;
pub use normalize::normalize;
pub use parameters::ParametersParser;
pub use parser::PathParser;
pub use relationship::PathRelationship;
pub use types::{Parameters, ParsedPath};
