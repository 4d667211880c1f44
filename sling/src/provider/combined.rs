//! The combined view over every mounted provider.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::path::{normalize, Parameters};
use crate::resource::Resource;

use super::authenticator::ResourceProviderAuthenticator;
use super::handler::ResourceProviderHandler;
use super::storage::ResourceProviderStorage;
use super::{AuthType, AuthenticationInfo, Children, ProviderState, ResolveContext};

/// One logical resource tree assembled from all mounted providers.
///
/// Each lookup is delegated to the provider with the most specific root
/// containing the path. Paths above a mount point that no provider serves
/// are filled in with synthetic resources, so the tree can be walked from
/// the root down to every mount.
///
/// A combined provider owns the authentication sessions of one resolution
/// context and works on the storage snapshot it was created with.
#[derive(Debug)]
pub struct CombinedResourceProvider {
    storage: Arc<ResourceProviderStorage>,
    authenticator: ResourceProviderAuthenticator,
}

impl CombinedResourceProvider {
    /// Creates a combined provider over a storage snapshot.
    ///
    /// No provider is logged in yet, see
    /// [`authenticate_all`](Self::authenticate_all).
    #[must_use]
    pub fn new(storage: Arc<ResourceProviderStorage>, auth_info: AuthenticationInfo) -> Self {
        Self {
            storage,
            authenticator: ResourceProviderAuthenticator::new(auth_info),
        }
    }

    /// Returns the storage snapshot in use.
    #[must_use]
    pub fn storage(&self) -> &Arc<ResourceProviderStorage> {
        &self.storage
    }

    /// Returns the session tracker.
    #[must_use]
    pub fn authenticator(&self) -> &ResourceProviderAuthenticator {
        &self.authenticator
    }

    /// Logs in to every provider that requires authentication.
    ///
    /// # Errors
    ///
    /// Returns the first login failure. Sessions opened before it stay open.
    pub fn authenticate_all(&mut self) -> Result<()> {
        let storage = Arc::clone(&self.storage);
        self.authenticator.authenticate_all(storage.handlers())
    }

    /// Returns the resource at `path`.
    ///
    /// The most specific provider is asked first. If it has nothing and some
    /// provider is mounted below `path`, a synthetic resource is returned
    /// unless `is_resolve` is set. Resolution must be able to fall back to
    /// shorter candidate paths instead of stopping at a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for relative paths, a login failure of
    /// a lazily authenticated provider, or any error raised by the provider.
    pub fn get_resource(
        &mut self,
        path: &str,
        parent: Option<&Resource>,
        parameters: &Parameters,
        is_resolve: bool,
    ) -> Result<Option<Resource>> {
        if !normalize::is_absolute(path) {
            log::debug!("Not absolute {path}");
            return Err(Error::InvalidPath {
                path: path.to_string(),
                reason: "path must be absolute".to_string(),
            });
        }

        let storage = Arc::clone(&self.storage);
        if let Some(handler) = storage.find_best_match(path) {
            if let Some(resource) = self.delegate_get(handler, path, parent, parameters)? {
                return Ok(Some(resource));
            }
        }

        if !is_resolve && storage.is_intermediate_path(path) {
            log::debug!("Resolved Synthetic {path}");
            return Ok(Some(Resource::synthetic(path)));
        }

        log::debug!("Resource null {path}");
        Ok(None)
    }

    /// Lists the children of `parent`.
    ///
    /// Children come from three sources, in this order: the provider owning
    /// `parent`, providers mounted exactly at a child path, and synthetic
    /// resources for child paths leading to deeper mounts. The first real
    /// resource seen for a path wins; synthetic resources are held back until
    /// every source is exhausted and only emitted for paths nothing real
    /// claimed. Every child gets its resolution path set to its own path.
    ///
    /// # Errors
    ///
    /// Returns errors of the owning provider. Login failures of providers
    /// mounted at a child path are logged and treated as "no resource".
    pub fn list_children(&mut self, parent: &Resource) -> Result<ChildIterator> {
        let storage = Arc::clone(&self.storage);
        let parent_path = parent.path();

        let mut real = None;
        if let Some(handler) = storage.find_best_match(parent_path) {
            let state = self.authenticator.get_or_authenticate(handler)?;
            let empty = Parameters::new();
            let ctx = ResolveContext {
                state: &state,
                parameters: &empty,
            };
            real = handler
                .provider()
                .list_children(&ctx, parent)?
                .map(|children| stamp_all(children, handler.info().root().to_string()));
        }

        let mut mounted = Vec::new();
        let mut synthetic = Vec::new();
        for (child_path, handler) in storage.child_mounts(parent_path) {
            let Some(handler) = handler else {
                synthetic.push(Resource::synthetic(child_path));
                continue;
            };
            let found = match self.delegate_get(handler, &child_path, Some(parent), &Parameters::new()) {
                Ok(found) => found,
                Err(e) if e.is_login_failure() => {
                    log::warn!("Skipping provider at {child_path}: {e}");
                    None
                }
                Err(e) => return Err(e),
            };
            match found {
                Some(resource) => mounted.push(resource),
                None if storage.is_intermediate_path(&child_path) => {
                    synthetic.push(Resource::synthetic(child_path));
                }
                None => {}
            }
        }

        Ok(ChildIterator {
            real,
            mounted: mounted.into_iter(),
            synthetic: synthetic.into_iter(),
            seen: HashSet::new(),
            held: VecDeque::new(),
        })
    }

    /// Returns the parent of `child`.
    ///
    /// The provider owning the parent path is asked. When it also owns the
    /// child its parent hook is used, otherwise it is asked for the parent
    /// path directly. A synthetic parent fills the gap above a mount point.
    ///
    /// # Errors
    ///
    /// Returns a login failure or any error raised by the provider.
    pub fn get_parent(&mut self, child: &Resource) -> Result<Option<Resource>> {
        let Some(parent_path) = normalize::parent(child.path()) else {
            return Ok(None);
        };

        let storage = Arc::clone(&self.storage);
        let child_handler = storage.find_best_match(child.path());
        if let Some(handler) = storage.find_best_match(&parent_path) {
            let state = self.authenticator.get_or_authenticate(handler)?;
            let empty = Parameters::new();
            let ctx = ResolveContext {
                state: &state,
                parameters: &empty,
            };
            let candidate = if child_handler.map(ResourceProviderHandler::id) == Some(handler.id()) {
                handler.provider().get_parent(&ctx, child)?
            } else {
                handler.provider().get_resource(&ctx, &parent_path, None)?
            };
            if let Some(resource) = candidate {
                return Ok(Some(stamp(resource, handler.info().root())));
            }
        }

        if storage.is_intermediate_path(&parent_path) {
            return Ok(Some(Resource::synthetic(parent_path)));
        }
        Ok(None)
    }

    /// Returns `false` if any provider in use reports a dead session.
    ///
    /// Providers that need no authentication are always checked; others only
    /// once a session has been opened for them.
    #[must_use]
    pub fn is_live(&self) -> bool {
        let empty = ProviderState::empty();
        for handler in self.storage.handlers() {
            let state = if handler.info().auth_type() == AuthType::No {
                &empty
            } else {
                match self.authenticator.session_state(handler.id()) {
                    Some(state) => state,
                    None => continue,
                }
            };
            if !handler.provider().is_live(state) {
                return false;
            }
        }
        true
    }

    /// Returns the union of attribute names of attribute-providing mounts.
    ///
    /// Providers that cannot be logged in are skipped.
    pub fn attribute_names(&mut self) -> Vec<String> {
        let storage = Arc::clone(&self.storage);
        let mut names: Vec<String> = Vec::new();
        for handler in storage.attributable_handlers() {
            let Some(state) = self.best_effort_state(handler) else {
                continue;
            };
            for name in handler.provider().attribute_names(&state) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Returns the first value any attribute-providing mount has for `name`.
    pub fn attribute(&mut self, name: &str) -> Option<String> {
        let storage = Arc::clone(&self.storage);
        for handler in storage.attributable_handlers() {
            let Some(state) = self.best_effort_state(handler) else {
                continue;
            };
            if let Some(value) = handler.provider().attribute(&state, name) {
                return Some(value);
            }
        }
        None
    }

    /// Closes every session opened through this provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Logout`] if any provider failed to log out.
    pub fn logout(&mut self) -> Result<()> {
        self.authenticator.logout()
    }

    fn delegate_get(
        &mut self,
        handler: &ResourceProviderHandler,
        path: &str,
        parent: Option<&Resource>,
        parameters: &Parameters,
    ) -> Result<Option<Resource>> {
        let state = self.authenticator.get_or_authenticate(handler)?;
        let ctx = ResolveContext {
            state: &state,
            parameters,
        };
        Ok(handler
            .provider()
            .get_resource(&ctx, path, parent)?
            .map(|resource| stamp(resource, handler.info().root())))
    }

    fn best_effort_state(&mut self, handler: &ResourceProviderHandler) -> Option<ProviderState> {
        match self.authenticator.get_or_authenticate(handler) {
            Ok(state) => Some(state),
            Err(e) => {
                log::debug!(
                    "Ignoring provider {} for attributes: {e}",
                    handler.info().display_name()
                );
                None
            }
        }
    }
}

fn stamp(mut resource: Resource, root: &str) -> Resource {
    let metadata = resource.metadata_mut();
    if metadata.provider_root.is_none() {
        metadata.provider_root = Some(root.to_string());
    }
    resource
}

fn with_resolution_path(mut resource: Resource) -> Resource {
    resource.metadata_mut().resolution_path = Some(resource.path().to_string());
    resource
}

fn stamp_all(children: Children, root: String) -> Children {
    Box::new(children.map(move |resource| stamp(resource, &root)))
}

/// Children of a resource merged from every contributing source.
///
/// Duplicates are dropped by path, keeping the first real resource seen.
/// Synthetic resources trail the real ones, in the order they were met.
pub struct ChildIterator {
    real: Option<Children>,
    mounted: std::vec::IntoIter<Resource>,
    synthetic: std::vec::IntoIter<Resource>,
    seen: HashSet<String>,
    held: VecDeque<Resource>,
}

impl ChildIterator {
    fn next_candidate(&mut self) -> Option<Resource> {
        if let Some(real) = self.real.as_mut() {
            if let Some(resource) = real.next() {
                return Some(resource);
            }
            self.real = None;
        }
        self.mounted.next().or_else(|| self.synthetic.next())
    }
}

impl Iterator for ChildIterator {
    type Item = Resource;

    fn next(&mut self) -> Option<Resource> {
        while let Some(resource) = self.next_candidate() {
            if self.seen.contains(resource.path()) {
                continue;
            }
            if resource.is_synthetic() {
                if !self.held.iter().any(|h| h.path() == resource.path()) {
                    self.held.push_back(resource);
                }
                continue;
            }
            self.held.retain(|h| h.path() != resource.path());
            self.seen.insert(resource.path().to_string());
            return Some(with_resolution_path(resource));
        }
        self.held.pop_front().map(with_resolution_path)
    }
}

impl std::fmt::Debug for ChildIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildIterator")
            .field("seen", &self.seen.len())
            .field("held", &self.held.len())
            .finish_non_exhaustive()
    }
}
