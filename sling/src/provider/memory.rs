//! A resource provider backed by an in-memory resource map.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::MountConfig;
use crate::error::{Error, Result};
use crate::resource::Resource;

use super::{AuthenticationInfo, Children, ProviderState, ResolveContext, ResourceProvider, USER};

/// Resource type given to configured resources that do not name one.
pub const DEFAULT_RESOURCE_TYPE: &str = "nt:unstructured";

/// Attribute exposing the user a session was opened for.
pub const USER_ATTRIBUTE: &str = "provider.user";

#[derive(Debug)]
struct MemorySession {
    user: Option<String>,
}

/// A provider serving a fixed set of resources.
///
/// Optionally restricted to a set of users: logging in with any other
/// `user.name` (or none) fails with [`Error::Login`].
///
/// # Examples
///
/// ```
/// use sling::provider::{InMemoryResourceProvider, ProviderState, ResolveContext, ResourceProvider};
/// use sling::{Parameters, Resource};
///
/// let provider = InMemoryResourceProvider::new()
///     .with_resource(Resource::new("/content", "app/folder"))
///     .with_resource(Resource::new("/content/page", "app/page"));
///
/// let state = ProviderState::empty();
/// let params = Parameters::new();
/// let ctx = ResolveContext { state: &state, parameters: &params };
///
/// let page = provider.get_resource(&ctx, "/content/page", None).unwrap().unwrap();
/// assert_eq!(page.resource_type(), "app/page");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: BTreeMap<String, Resource>,
    allowed_users: Option<BTreeSet<String>>,
}

impl InMemoryResourceProvider {
    /// Creates an empty provider open to everyone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a provider from a configured mount.
    #[must_use]
    pub fn from_mount(mount: &MountConfig) -> Self {
        let mut provider = Self::new();
        for config in mount.resources.iter().flatten() {
            let resource_type = config
                .resource_type
                .as_deref()
                .unwrap_or(DEFAULT_RESOURCE_TYPE);
            let mut resource = Resource::new(config.path.clone(), resource_type);
            if let Some(super_type) = &config.resource_super_type {
                resource = resource.with_super_type(super_type.clone());
            }
            for (name, value) in config.properties.iter().flatten() {
                resource = resource.with_property(name.clone(), value.clone());
            }
            provider = provider.with_resource(resource);
        }
        if let Some(users) = &mount.allowed_users {
            provider = provider.with_allowed_users(users.iter().cloned());
        }
        provider
    }

    /// Adds a resource, replacing any resource at the same path.
    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.insert(resource.path().to_string(), resource);
        self
    }

    /// Restricts logins to the given users.
    #[must_use]
    pub fn with_allowed_users(mut self, users: impl IntoIterator<Item = String>) -> Self {
        self.allowed_users = Some(users.into_iter().collect());
        self
    }

    /// Returns the number of resources held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the provider holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn has_descendants(&self, path: &str) -> bool {
        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };
        self.resources
            .range(prefix.clone()..)
            .take_while(|(p, _)| p.starts_with(&prefix))
            .any(|(p, _)| p.len() > prefix.len())
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn authenticate(&self, auth_info: &AuthenticationInfo) -> Result<ProviderState> {
        let user = auth_info.get(USER).cloned();
        if let Some(allowed) = &self.allowed_users {
            let permitted = user.as_ref().is_some_and(|u| allowed.contains(u));
            if !permitted {
                return Err(Error::Login {
                    provider: "in-memory".to_string(),
                    reason: match &user {
                        Some(u) => format!("user {u} is not allowed"),
                        None => "no user given".to_string(),
                    },
                });
            }
        }
        Ok(ProviderState::new(MemorySession { user }))
    }

    fn get_resource(
        &self,
        _ctx: &ResolveContext<'_>,
        path: &str,
        _parent: Option<&Resource>,
    ) -> Result<Option<Resource>> {
        Ok(self.resources.get(path).cloned())
    }

    fn list_children(
        &self,
        _ctx: &ResolveContext<'_>,
        parent: &Resource,
    ) -> Result<Option<Children>> {
        let parent_path = parent.path();
        if !self.resources.contains_key(parent_path) && !self.has_descendants(parent_path) {
            return Ok(None);
        }
        let children: Vec<Resource> = self
            .resources
            .values()
            .filter(|r| r.parent_path().as_deref() == Some(parent_path))
            .cloned()
            .collect();
        Ok(Some(Box::new(children.into_iter())))
    }

    fn attribute_names(&self, state: &ProviderState) -> Vec<String> {
        match state.downcast_ref::<MemorySession>() {
            Some(MemorySession { user: Some(_) }) => vec![USER_ATTRIBUTE.to_string()],
            _ => Vec::new(),
        }
    }

    fn attribute(&self, state: &ProviderState, name: &str) -> Option<String> {
        if name != USER_ATTRIBUTE {
            return None;
        }
        state
            .downcast_ref::<MemorySession>()
            .and_then(|session| session.user.clone())
    }
}
