//! Test utilities for provider composition tests.
//!
//! This module provides providers that record how they are used or fail in
//! controlled ways. It is only available in test builds.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::resource::Resource;

use super::{
    AuthenticationInfo, Children, InMemoryResourceProvider, ProviderState, ResolveContext,
    ResourceProvider,
};

/// An in-memory provider that counts logins, logouts and lookups.
///
/// The session state handed out is the login sequence number as `u64`.
#[derive(Debug, Default)]
pub struct CountingProvider {
    inner: InMemoryResourceProvider,
    logins: AtomicU64,
    logouts: AtomicU64,
    lookups: AtomicU64,
    dead: AtomicBool,
    attributes: Vec<(String, String)>,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.inner = self.inner.with_resource(resource);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn logins(&self) -> u64 {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> u64 {
        self.logouts.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn set_live(&self, live: bool) {
        self.dead.store(!live, Ordering::SeqCst);
    }
}

impl ResourceProvider for CountingProvider {
    fn authenticate(&self, _auth_info: &AuthenticationInfo) -> Result<ProviderState> {
        let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ProviderState::new(n))
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
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_resource(ctx, path, parent)
    }

    fn list_children(
        &self,
        ctx: &ResolveContext<'_>,
        parent: &Resource,
    ) -> Result<Option<Children>> {
        self.inner.list_children(ctx, parent)
    }

    fn is_live(&self, _state: &ProviderState) -> bool {
        !self.dead.load(Ordering::SeqCst)
    }

    fn attribute_names(&self, _state: &ProviderState) -> Vec<String> {
        self.attributes.iter().map(|(k, _)| k.clone()).collect()
    }

    fn attribute(&self, _state: &ProviderState, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// A provider that refuses every login.
#[derive(Debug, Default)]
pub struct FailingLoginProvider;

impl ResourceProvider for FailingLoginProvider {
    fn authenticate(&self, _auth_info: &AuthenticationInfo) -> Result<ProviderState> {
        Err(Error::Login {
            provider: "failing".to_string(),
            reason: "login refused".to_string(),
        })
    }

    fn get_resource(
        &self,
        _ctx: &ResolveContext<'_>,
        _path: &str,
        _parent: Option<&Resource>,
    ) -> Result<Option<Resource>> {
        Ok(None)
    }

    fn list_children(
        &self,
        _ctx: &ResolveContext<'_>,
        _parent: &Resource,
    ) -> Result<Option<Children>> {
        Ok(None)
    }
}

/// A provider whose logout always fails.
#[derive(Debug, Default)]
pub struct FailingLogoutProvider;

impl ResourceProvider for FailingLogoutProvider {
    fn logout(&self, _state: &ProviderState) -> Result<()> {
        Err(Error::Provider {
            provider: "failing".to_string(),
            message: "logout refused".to_string(),
        })
    }

    fn get_resource(
        &self,
        _ctx: &ResolveContext<'_>,
        _path: &str,
        _parent: Option<&Resource>,
    ) -> Result<Option<Resource>> {
        Ok(None)
    }

    fn list_children(
        &self,
        _ctx: &ResolveContext<'_>,
        _parent: &Resource,
    ) -> Result<Option<Children>> {
        Ok(None)
    }
}

/// A provider whose backing store is broken.
#[derive(Debug, Default)]
pub struct BrokenProvider;

impl ResourceProvider for BrokenProvider {
    fn get_resource(
        &self,
        _ctx: &ResolveContext<'_>,
        path: &str,
        _parent: Option<&Resource>,
    ) -> Result<Option<Resource>> {
        Err(Error::Provider {
            provider: "broken".to_string(),
            message: format!("cannot read {path}"),
        })
    }

    fn list_children(
        &self,
        _ctx: &ResolveContext<'_>,
        parent: &Resource,
    ) -> Result<Option<Children>> {
        Err(Error::Provider {
            provider: "broken".to_string(),
            message: format!("cannot list {}", parent.path()),
        })
    }
}

/// A provider that reports the parameters it was called with as a property.
#[derive(Debug, Default)]
pub struct EchoParametersProvider;

impl ResourceProvider for EchoParametersProvider {
    fn get_resource(
        &self,
        ctx: &ResolveContext<'_>,
        path: &str,
        _parent: Option<&Resource>,
    ) -> Result<Option<Resource>> {
        Ok(Some(
            Resource::new(path, "echo").with_property("parameters", ctx.parameters.to_string()),
        ))
    }

    fn list_children(
        &self,
        _ctx: &ResolveContext<'_>,
        _parent: &Resource,
    ) -> Result<Option<Children>> {
        Ok(None)
    }
}
