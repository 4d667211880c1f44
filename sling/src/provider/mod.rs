//! Resource providers and their composition into one resource tree.
//!
//! A [`ResourceProvider`] serves the resources below a single root path.
//! Providers are registered with a [`ResourceProviderTracker`], which
//! publishes immutable [`ResourceProviderStorage`] snapshots. A resolution
//! context combines one snapshot with a [`ResourceProviderAuthenticator`]
//! into a [`CombinedResourceProvider`], the single entry point used to look
//! up resources and list children across all mounts.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use sling::provider::{
//!     AuthType, CombinedResourceProvider, InMemoryResourceProvider, ProviderInfo,
//!     ResourceProviderTracker,
//! };
//! use sling::{Parameters, Resource};
//!
//! let tracker = ResourceProviderTracker::new();
//! tracker
//!     .register(
//!         ProviderInfo::new("/").with_auth_type(AuthType::Required),
//!         Arc::new(InMemoryResourceProvider::new().with_resource(Resource::new("/something", "t"))),
//!     )
//!     .unwrap();
//! tracker
//!     .register(
//!         ProviderInfo::new("/some/path"),
//!         Arc::new(InMemoryResourceProvider::new().with_resource(Resource::new("/some/path", "t"))),
//!     )
//!     .unwrap();
//!
//! let mut combined = CombinedResourceProvider::new(tracker.storage(), Default::default());
//! combined.authenticate_all().unwrap();
//!
//! let some = combined.get_resource("/some", None, &Parameters::new(), false).unwrap().unwrap();
//! assert!(some.is_synthetic());
//! assert!(combined.get_resource("/nothing", None, &Parameters::new(), false).unwrap().is_none());
//! ```

pub mod authenticator;
pub mod combined;
pub mod handler;
pub mod memory;
pub mod storage;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_util;

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::{normalize, Parameters};
use crate::resource::Resource;

pub use authenticator::ResourceProviderAuthenticator;
pub use combined::{ChildIterator, CombinedResourceProvider};
pub use handler::ResourceProviderHandler;
pub use memory::InMemoryResourceProvider;
pub use storage::ResourceProviderStorage;
pub use tracker::ResourceProviderTracker;

/// Authentication info key holding the user name.
pub const USER: &str = "user.name";

/// Authentication info key holding the password.
///
/// This key is never exposed through resolver attributes.
pub const PASSWORD: &str = "user.password";

/// Credentials and other login data handed to providers.
pub type AuthenticationInfo = BTreeMap<String, String>;

/// Lazily produced children of a resource.
pub type Children = Box<dyn Iterator<Item = Resource> + Send>;

/// When a provider needs to be logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// The provider is used without authentication.
    #[default]
    #[serde(alias = "none")]
    No,
    /// The provider is logged in when a resolution context is opened.
    Required,
    /// The provider is logged in the first time it is used.
    Lazy,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Required => write!(f, "required"),
            Self::Lazy => write!(f, "lazy"),
        }
    }
}

/// Registration metadata of a resource provider.
///
/// # Examples
///
/// ```
/// use sling::provider::{AuthType, ProviderInfo};
///
/// let info = ProviderInfo::new("/libs")
///     .with_name("libs")
///     .with_auth_type(AuthType::Lazy)
///     .with_ranking(10);
///
/// assert_eq!(info.root(), "/libs");
/// assert_eq!(info.display_name(), "libs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    root: String,
    name: Option<String>,
    auth_type: AuthType,
    ranking: i32,
    attributable: bool,
}

impl ProviderInfo {
    /// Creates info for a provider mounted at `root`.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: None,
            auth_type: AuthType::No,
            ranking: 0,
            attributable: false,
        }
    }

    /// Sets a descriptive name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the authentication requirement.
    #[must_use]
    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = auth_type;
        self
    }

    /// Sets the ranking used to order providers sharing a root.
    #[must_use]
    pub fn with_ranking(mut self, ranking: i32) -> Self {
        self.ranking = ranking;
        self
    }

    /// Marks the provider as contributing resolver attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributable: bool) -> Self {
        self.attributable = attributable;
        self
    }

    /// Returns the mount root.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the configured name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name, falling back to the root.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.root)
    }

    /// Returns the authentication requirement.
    #[must_use]
    pub fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    /// Returns the ranking.
    #[must_use]
    pub fn ranking(&self) -> i32 {
        self.ranking
    }

    /// Returns `true` if the provider contributes resolver attributes.
    #[must_use]
    pub fn is_attributable(&self) -> bool {
        self.attributable
    }
}

/// Opaque per-session state returned by [`ResourceProvider::authenticate`].
///
/// Providers store whatever they need to serve an authenticated session and
/// recover it with [`downcast_ref`](Self::downcast_ref).
#[derive(Clone, Default)]
pub struct ProviderState(Option<Arc<dyn Any + Send + Sync>>);

impl ProviderState {
    /// Wraps provider-specific session state.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// State of a provider that keeps no session data.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }

    /// Returns the wrapped state if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns `true` if no state is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_some() {
            write!(f, "ProviderState(..)")
        } else {
            write!(f, "ProviderState(empty)")
        }
    }
}

/// Per-call context handed to a provider.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Session state of the provider for the current resolution context.
    pub state: &'a ProviderState,
    /// Matrix parameters of the request, empty outside request resolution.
    pub parameters: &'a Parameters,
}

/// A backing store serving the resources below one root path.
///
/// Only [`get_resource`](Self::get_resource) and
/// [`list_children`](Self::list_children) are mandatory. The remaining hooks
/// have defaults suitable for providers without sessions.
pub trait ResourceProvider: Send + Sync {
    /// Logs in with the given authentication info.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Login`](crate::Error::Login) if the info is refused.
    fn authenticate(&self, auth_info: &AuthenticationInfo) -> Result<ProviderState> {
        let _ = auth_info;
        Ok(ProviderState::empty())
    }

    /// Ends a session opened by [`authenticate`](Self::authenticate).
    ///
    /// # Errors
    ///
    /// Returns an error if the session could not be closed cleanly.
    fn logout(&self, state: &ProviderState) -> Result<()> {
        let _ = state;
        Ok(())
    }

    /// Returns the resource at `path`, if this provider has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn get_resource(
        &self,
        ctx: &ResolveContext<'_>,
        path: &str,
        parent: Option<&Resource>,
    ) -> Result<Option<Resource>>;

    /// Lists the children of `parent`.
    ///
    /// `None` means the provider has nothing to say about this resource,
    /// which is different from an empty listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn list_children(&self, ctx: &ResolveContext<'_>, parent: &Resource)
        -> Result<Option<Children>>;

    /// Returns the parent of `child`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn get_parent(&self, ctx: &ResolveContext<'_>, child: &Resource) -> Result<Option<Resource>> {
        match normalize::parent(child.path()) {
            Some(parent_path) => self.get_resource(ctx, &parent_path, None),
            None => Ok(None),
        }
    }

    /// Returns `false` once the session can no longer be used.
    fn is_live(&self, state: &ProviderState) -> bool {
        let _ = state;
        true
    }

    /// Returns the names of the attributes this provider exposes.
    fn attribute_names(&self, state: &ProviderState) -> Vec<String> {
        let _ = state;
        Vec::new()
    }

    /// Returns a single attribute.
    fn attribute(&self, state: &ProviderState, name: &str) -> Option<String> {
        let _ = (state, name);
        None
    }
}
