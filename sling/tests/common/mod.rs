//! Common test utilities for integration tests.
//!
//! This module provides provider fixtures shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sling::provider::{
    AuthType, AuthenticationInfo, Children, InMemoryResourceProvider, ProviderInfo, ProviderState,
    ResolveContext, ResourceProvider, ResourceProviderTracker,
};
use sling::{Error, Resource, Result};

/// A provider wrapping an in-memory tree that records session activity.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    inner: InMemoryResourceProvider,
    refuse_login: bool,
    logins: AtomicUsize,
    logouts: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        Self {
            refuse_login: true,
            ..Self::default()
        }
    }

    pub fn with_resource(mut self, path: &str, resource_type: &str) -> Self {
        self.inner = self.inner.with_resource(Resource::new(path, resource_type));
        self
    }

    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

impl ResourceProvider for RecordingProvider {
    fn authenticate(&self, _auth_info: &AuthenticationInfo) -> Result<ProviderState> {
        if self.refuse_login {
            return Err(Error::Login {
                provider: "recording".to_string(),
                reason: "refused".to_string(),
            });
        }
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderState::new(()))
    }

    fn logout(&self, _state: &ProviderState) -> Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get_resource(
        &self,
        ctx: &ResolveContext<'_>,
        path: &str,
        parent: Option<&Resource>,
    ) -> Result<Option<Resource>> {
        self.inner.get_resource(ctx, path, parent)
    }

    fn list_children(
        &self,
        ctx: &ResolveContext<'_>,
        parent: &Resource,
    ) -> Result<Option<Children>> {
        self.inner.list_children(ctx, parent)
    }
}

/// Mounts at `/` (serving `/` and `/something`) and at `/some/path`.
#[allow(dead_code)]
pub fn sample_tracker(auth_type: AuthType) -> ResourceProviderTracker {
    let tracker = ResourceProviderTracker::new();
    tracker
        .register(
            ProviderInfo::new("/").with_auth_type(auth_type),
            Arc::new(
                InMemoryResourceProvider::new()
                    .with_resource(Resource::new("/", "root"))
                    .with_resource(Resource::new("/something", "sample/type")),
            ),
        )
        .unwrap();
    tracker
        .register(
            ProviderInfo::new("/some/path").with_auth_type(auth_type),
            Arc::new(
                InMemoryResourceProvider::new()
                    .with_resource(Resource::new("/some/path", "sample/mounted"))
                    .with_resource(Resource::new("/some/path/child", "sample/child")),
            ),
        )
        .unwrap();
    tracker
}

/// Collects and sorts the paths of a resource listing.
#[allow(dead_code)]
pub fn sorted_paths(resources: impl Iterator<Item = Resource>) -> Vec<String> {
    let mut paths: Vec<String> = resources.map(|r| r.path().to_string()).collect();
    paths.sort();
    paths
}
