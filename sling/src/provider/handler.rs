//! Registered provider handles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{ProviderInfo, ResourceProvider};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// A resource provider together with its registration metadata.
///
/// Each handler gets a process-unique id at creation. The id identifies the
/// registration in authentication session tables and breaks ordering ties
/// between providers with the same root and ranking, earlier registrations
/// first.
#[derive(Clone)]
pub struct ResourceProviderHandler {
    id: u64,
    info: ProviderInfo,
    provider: Arc<dyn ResourceProvider>,
}

impl ResourceProviderHandler {
    /// Creates a handler for a provider.
    #[must_use]
    pub fn new(info: ProviderInfo, provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            id: NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed),
            info,
            provider,
        }
    }

    /// Returns the registration id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the registration metadata.
    #[must_use]
    pub fn info(&self) -> &ProviderInfo {
        &self.info
    }

    /// Returns the provider.
    #[must_use]
    pub fn provider(&self) -> &dyn ResourceProvider {
        self.provider.as_ref()
    }
}

impl fmt::Debug for ResourceProviderHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceProviderHandler")
            .field("id", &self.id)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
