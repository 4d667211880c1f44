//! Provider registration with copy-on-write storage snapshots.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::Result;

use super::handler::ResourceProviderHandler;
use super::memory::InMemoryResourceProvider;
use super::storage::ResourceProviderStorage;
use super::{ProviderInfo, ResourceProvider};

/// Keeps the set of registered providers and publishes storage snapshots.
///
/// Every registration change builds a fresh [`ResourceProviderStorage`] and
/// swaps it in. Callers holding an earlier snapshot keep seeing the
/// providers that were registered when they took it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sling::provider::{InMemoryResourceProvider, ProviderInfo, ResourceProviderTracker};
///
/// let tracker = ResourceProviderTracker::new();
/// let before = tracker.storage();
/// let id = tracker
///     .register(ProviderInfo::new("/apps"), Arc::new(InMemoryResourceProvider::new()))
///     .unwrap();
///
/// assert!(before.is_empty());
/// assert_eq!(tracker.storage().len(), 1);
/// assert!(tracker.unregister(id));
/// assert!(tracker.storage().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ResourceProviderTracker {
    current: RwLock<Arc<ResourceProviderStorage>>,
}

impl ResourceProviderTracker {
    /// Creates a tracker with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker serving the mounts of a configuration.
    ///
    /// Each mount is backed by an [`InMemoryResourceProvider`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`](crate::Error::InvalidPath) if a mount
    /// root is not absolute and normalized.
    pub fn from_config(config: &Config) -> Result<Self> {
        let tracker = Self::new();
        for mount in config.mounts.iter().flatten() {
            tracker.register(
                mount.provider_info(),
                Arc::new(InMemoryResourceProvider::from_mount(mount)),
            )?;
        }
        Ok(tracker)
    }

    /// Registers a provider and returns its handler id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`](crate::Error::InvalidPath) if the root
    /// is not absolute and normalized. The current snapshot is left as is.
    pub fn register(&self, info: ProviderInfo, provider: Arc<dyn ResourceProvider>) -> Result<u64> {
        let handler = ResourceProviderHandler::new(info, provider);
        let id = handler.id();
        let root = handler.info().root().to_string();

        let mut current = self.current.write();
        let mut handlers = current.handlers().to_vec();
        handlers.push(handler);
        *current = Arc::new(ResourceProviderStorage::new(handlers)?);

        log::debug!("Registered provider {id} at {root}");
        Ok(id)
    }

    /// Removes a provider by handler id.
    ///
    /// Returns `false` if no provider with that id is registered.
    pub fn unregister(&self, id: u64) -> bool {
        let mut current = self.current.write();
        if !current.handlers().iter().any(|h| h.id() == id) {
            return false;
        }

        let handlers: Vec<_> = current
            .handlers()
            .iter()
            .filter(|h| h.id() != id)
            .cloned()
            .collect();
        // Roots were already validated when the handlers were registered.
        *current = Arc::new(ResourceProviderStorage::from_sorted(handlers));

        log::debug!("Unregistered provider {id}");
        true
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn storage(&self) -> Arc<ResourceProviderStorage> {
        Arc::clone(&self.current.read())
    }
}
