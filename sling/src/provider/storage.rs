//! Immutable registry snapshots of mounted providers.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::path::{normalize, PathRelationship};

use super::handler::ResourceProviderHandler;

/// An immutable, queryable set of mounted providers.
///
/// Handlers are kept in specificity order: longer roots first, then higher
/// ranking, then earlier registration. The first handler whose root contains
/// a path is therefore the authoritative provider for it.
///
/// A storage is never modified after construction. Registering or removing a
/// provider builds a new storage, see
/// [`ResourceProviderTracker`](super::ResourceProviderTracker).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sling::provider::{
///     InMemoryResourceProvider, ProviderInfo, ResourceProviderHandler, ResourceProviderStorage,
/// };
///
/// let handler = |root: &str| {
///     ResourceProviderHandler::new(ProviderInfo::new(root), Arc::new(InMemoryResourceProvider::new()))
/// };
/// let storage = ResourceProviderStorage::new(vec![handler("/a"), handler("/a/b")]).unwrap();
///
/// assert_eq!(storage.find_best_match("/a/b/c").unwrap().info().root(), "/a/b");
/// assert_eq!(storage.find_best_match("/a/x").unwrap().info().root(), "/a");
/// assert!(storage.find_best_match("/z").is_none());
/// assert!(storage.is_intermediate_path("/a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceProviderStorage {
    handlers: Vec<ResourceProviderHandler>,
}

impl ResourceProviderStorage {
    /// Builds a snapshot from a set of handlers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if a root is not absolute or not
    /// normalized.
    pub fn new(mut handlers: Vec<ResourceProviderHandler>) -> Result<Self> {
        for handler in &handlers {
            validate_root(handler.info().root())?;
        }
        handlers.sort_by(|a, b| {
            let (a_info, b_info) = (a.info(), b.info());
            b_info
                .root()
                .len()
                .cmp(&a_info.root().len())
                .then_with(|| a_info.root().cmp(b_info.root()))
                .then_with(|| b_info.ranking().cmp(&a_info.ranking()))
                .then_with(|| a.id().cmp(&b.id()))
        });
        log::debug!("Built provider storage with {} handler(s)", handlers.len());
        Ok(Self { handlers })
    }

    /// Wraps handlers that are already validated and in specificity order.
    pub(crate) fn from_sorted(handlers: Vec<ResourceProviderHandler>) -> Self {
        Self { handlers }
    }

    /// Returns the handlers in specificity order.
    #[must_use]
    pub fn handlers(&self) -> &[ResourceProviderHandler] {
        &self.handlers
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the handler with the longest root containing `path`.
    #[must_use]
    pub fn find_best_match(&self, path: &str) -> Option<&ResourceProviderHandler> {
        self.find_matching(path).next()
    }

    /// Returns every handler whose root contains `path`, most specific first.
    pub fn find_matching<'a, 'p>(
        &'a self,
        path: &'p str,
    ) -> impl Iterator<Item = &'a ResourceProviderHandler> + 'p
    where
        'a: 'p,
    {
        self.handlers
            .iter()
            .filter(move |h| PathRelationship::is_within(path, h.info().root()))
    }

    /// Returns every handler mounted strictly below `path`.
    pub fn find_descendant_roots<'a, 'p>(
        &'a self,
        path: &'p str,
    ) -> impl Iterator<Item = &'a ResourceProviderHandler> + 'p
    where
        'a: 'p,
    {
        self.handlers.iter().filter(move |h| {
            PathRelationship::between(path, h.info().root()) == PathRelationship::Ancestor
        })
    }

    /// Returns `true` if some provider is mounted strictly below `path`.
    #[must_use]
    pub fn is_intermediate_path(&self, path: &str) -> bool {
        self.find_descendant_roots(path).next().is_some()
    }

    /// Returns the immediate children of `path` that lead to a mount.
    ///
    /// Each entry maps the child path to the authoritative handler mounted
    /// exactly at that child, or `None` if the child only leads to mounts
    /// further down. Entries are ordered by child path.
    #[must_use]
    pub fn child_mounts(&self, path: &str) -> BTreeMap<String, Option<&ResourceProviderHandler>> {
        let mut children: BTreeMap<String, Option<&ResourceProviderHandler>> = BTreeMap::new();
        for handler in self.find_descendant_roots(path) {
            let root = handler.info().root();
            let rest = root[path.len()..].trim_start_matches('/');
            let segment = rest.split('/').next().unwrap_or(rest);
            let child_path = normalize::join(path, segment);
            let exact = child_path == root;
            let entry = children.entry(child_path).or_insert(None);
            if exact && entry.is_none() {
                *entry = Some(handler);
            }
        }
        children
    }

    /// Returns the handlers that contribute resolver attributes.
    pub fn attributable_handlers(&self) -> impl Iterator<Item = &ResourceProviderHandler> {
        self.handlers.iter().filter(|h| h.info().is_attributable())
    }
}

fn validate_root(root: &str) -> Result<()> {
    if !normalize::is_absolute(root) {
        return Err(Error::InvalidPath {
            path: root.to_string(),
            reason: "provider root must be absolute".to_string(),
        });
    }
    if normalize::normalize(root).as_deref() != Some(root) {
        return Err(Error::InvalidPath {
            path: root.to_string(),
            reason: "provider root must be normalized".to_string(),
        });
    }
    Ok(())
}
