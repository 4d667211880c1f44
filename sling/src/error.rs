//! Error types for the sling library.
//!
//! This module provides the error hierarchy shared by path handling, provider
//! composition, authentication and configuration, using `thiserror` for
//! ergonomic error handling.
//!
//! Note that malformed matrix parameters are never reported through this
//! type: the path parser degrades to "no parameters" instead.

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that may fail with a sling error.
///
/// # Examples
///
/// ```
/// use sling::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/content".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the sling library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path that must be absolute (or normalizable) was not.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A resource provider refused the supplied authentication info.
    #[error("login to provider {provider} failed: {reason}")]
    Login {
        /// The provider (name or root) that refused the login.
        provider: String,
        /// The reason given by the provider.
        reason: String,
    },

    /// One or more providers failed to log out.
    ///
    /// Every open session is attempted before this error is reported.
    #[error("logout failed for {} provider(s): {}", failures.len(), LogoutFailures(failures))]
    Logout {
        /// The individual failures, in the order the sessions were closed.
        failures: Vec<LogoutFailure>,
    },

    /// A backing store reported a failure while serving a request.
    #[error("provider {provider} failed: {message}")]
    Provider {
        /// The provider (name or root) that failed.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The resource resolver has already been closed.
    #[error("resource resolver is already closed")]
    ResolverClosed,

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// A single provider that failed to log out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutFailure {
    /// The provider (name or root) whose logout failed.
    pub provider: String,
    /// The reason reported by the provider.
    pub reason: String,
}

impl fmt::Display for LogoutFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.provider, self.reason)
    }
}

struct LogoutFailures<'a>(&'a [LogoutFailure]);

impl fmt::Display for LogoutFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Check if error is an authentication failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use sling::Error;
    ///
    /// let err = Error::Login {
    ///     provider: "/content".to_string(),
    ///     reason: "unknown user".to_string(),
    /// };
    /// assert!(err.is_login_failure());
    /// ```
    #[must_use]
    pub fn is_login_failure(&self) -> bool {
        matches!(self, Self::Login { .. })
    }

    /// Check if error reports use of a closed resolver.
    ///
    /// # Examples
    ///
    /// ```
    /// use sling::Error;
    ///
    /// assert!(Error::ResolverClosed.is_closed());
    /// ```
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ResolverClosed)
    }
}
