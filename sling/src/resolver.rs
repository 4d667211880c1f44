//! Resource resolver sessions.
//!
//! A [`ResourceResolver`] is the per-caller entry point: it owns one
//! [`CombinedResourceProvider`], and with it one set of provider sessions,
//! over the storage snapshot that was current when it was opened. It is not
//! shared between threads; open one resolver per unit of work and close it
//! when done.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::path::{normalize, Parameters, PathParser, ResourcePathIterator};
use crate::provider::{
    AuthenticationInfo, ChildIterator, CombinedResourceProvider, ResourceProviderStorage, PASSWORD,
    USER,
};
use crate::resource::Resource;

/// A resolution context over a set of mounted providers.
///
/// Opening a resolver logs in to every provider that requires it. Closing it
/// (explicitly with [`close`](Self::close) or implicitly on drop) logs out of
/// every provider it logged in to. Once closed, every operation fails with
/// [`Error::ResolverClosed`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sling::provider::{InMemoryResourceProvider, ProviderInfo, ResourceProviderTracker};
/// use sling::{Resource, ResourceResolver};
///
/// let tracker = ResourceProviderTracker::new();
/// tracker
///     .register(
///         ProviderInfo::new("/"),
///         Arc::new(InMemoryResourceProvider::new().with_resource(Resource::new("/a/b", "app/page"))),
///     )
///     .unwrap();
///
/// let mut resolver = ResourceResolver::new(tracker.storage(), Default::default()).unwrap();
/// let resource = resolver.resolve("/a/b;v=1.html/suffix").unwrap();
///
/// assert_eq!(resource.path(), "/a/b");
/// assert_eq!(resource.metadata().resolution_path_info.as_deref(), Some(".html/suffix"));
/// assert_eq!(resource.metadata().parameters.get("v"), Some("1"));
/// resolver.close().unwrap();
/// ```
#[derive(Debug)]
pub struct ResourceResolver {
    provider: CombinedResourceProvider,
    closed: bool,
}

impl ResourceResolver {
    /// Opens a resolver over a storage snapshot.
    ///
    /// # Errors
    ///
    /// Returns the login failure of the first required provider that refuses
    /// the authentication info. Sessions opened before it are closed again.
    pub fn new(storage: Arc<ResourceProviderStorage>, auth_info: AuthenticationInfo) -> Result<Self> {
        let mut provider = CombinedResourceProvider::new(storage, auth_info);
        if let Err(e) = provider.authenticate_all() {
            if let Err(logout) = provider.logout() {
                log::warn!("Cleanup after failed login: {logout}");
            }
            return Err(e);
        }
        log::debug!(
            "Opened resolver with {} session(s)",
            provider.authenticator().session_count()
        );
        Ok(Self {
            provider,
            closed: false,
        })
    }

    /// Resolves a request path to a resource.
    ///
    /// Matrix parameters are removed first. The remaining path is made
    /// absolute and normalized, then tried as a whole and with successively
    /// shorter candidates cut at a `.`. The first resource found carries the
    /// matched candidate as resolution path and the cut-off part as path
    /// info. If no candidate matches, a non-existing resource is returned
    /// whose path info starts at the first `.` of the path.
    ///
    /// Synthetic intermediate resources never satisfy a resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] after [`close`](Self::close), a
    /// login failure of a lazily authenticated provider, or any error
    /// raised by a provider.
    pub fn resolve(&mut self, raw_path: &str) -> Result<Resource> {
        self.check_open()?;

        let (path, parameters) = PathParser::parse(raw_path).into_parts();
        let absolute = if normalize::is_absolute(&path) {
            path
        } else {
            format!("/{path}")
        };
        let Some(request_path) = normalize::normalize(&absolute) else {
            log::debug!("resolve: Path {absolute} escapes the root");
            return Ok(non_existing(absolute, parameters));
        };

        for candidate in ResourcePathIterator::new(&request_path) {
            let found = self
                .provider
                .get_resource(&candidate, None, &parameters, true)?;
            if let Some(mut resource) = found {
                let info = request_path
                    .get(candidate.len()..)
                    .unwrap_or_default()
                    .to_string();
                log::debug!(
                    "resolve: Found {} with path info {info} for {request_path}",
                    resource.path()
                );
                let metadata = resource.metadata_mut();
                metadata.resolution_path = Some(candidate);
                metadata.resolution_path_info = Some(info);
                metadata.parameters = parameters;
                return Ok(resource);
            }
        }

        log::debug!("resolve: Path {request_path} does not resolve");
        Ok(non_existing(request_path, parameters))
    }

    /// Returns the resource at an absolute path.
    ///
    /// Matrix parameters in `path` are removed and handed to the provider.
    /// Synthetic resources for intermediate paths are returned. Paths whose
    /// `..` segments escape the root address nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for relative paths,
    /// [`Error::ResolverClosed`] after [`close`](Self::close), a login
    /// failure or any error raised by a provider.
    pub fn get_resource(&mut self, path: &str) -> Result<Option<Resource>> {
        self.check_open()?;

        let (path, parameters) = PathParser::parse(path).into_parts();
        if !normalize::is_absolute(&path) {
            return Err(Error::InvalidPath {
                path,
                reason: "path must be absolute".to_string(),
            });
        }
        match normalize::normalize(&path) {
            Some(normalized) => self
                .provider
                .get_resource(&normalized, None, &parameters, false),
            None => Ok(None),
        }
    }

    /// Lists the children of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] after [`close`](Self::close), or
    /// any error raised by the provider owning `parent`.
    pub fn list_children(&mut self, parent: &Resource) -> Result<ChildIterator> {
        self.check_open()?;
        self.provider.list_children(parent)
    }

    /// Returns the parent of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] after [`close`](Self::close), a
    /// login failure or any error raised by a provider.
    pub fn get_parent(&mut self, child: &Resource) -> Result<Option<Resource>> {
        self.check_open()?;
        self.provider.get_parent(child)
    }

    /// Returns `true` while the resolver is open and every session is usable.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.closed && self.provider.is_live()
    }

    /// Returns the user the resolver was opened for.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.auth_info().get(USER).map(String::as_str)
    }

    /// Returns the names of all resolver attributes.
    ///
    /// Attributes come from attribute-providing mounts and from the
    /// authentication info. The password is never exposed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] after [`close`](Self::close).
    pub fn attribute_names(&mut self) -> Result<Vec<String>> {
        self.check_open()?;
        let mut names = self.provider.attribute_names();
        for name in self.auth_info().keys() {
            if name != PASSWORD && !names.contains(name) {
                names.push(name.clone());
            }
        }
        names.retain(|name| name != PASSWORD);
        Ok(names)
    }

    /// Returns a resolver attribute.
    ///
    /// Provider attributes shadow authentication info. The password is never
    /// exposed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] after [`close`](Self::close).
    pub fn attribute(&mut self, name: &str) -> Result<Option<String>> {
        self.check_open()?;
        if name == PASSWORD {
            return Ok(None);
        }
        Ok(self
            .provider
            .attribute(name)
            .or_else(|| self.auth_info().get(name).cloned()))
    }

    /// Returns `true` once [`close`](Self::close) was called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes the resolver, logging out of every provider.
    ///
    /// Closing an already closed resolver does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Logout`] if some providers failed to log out. The
    /// resolver is closed regardless.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        log::debug!("Closing resolver");
        self.provider.logout()
    }

    fn auth_info(&self) -> &AuthenticationInfo {
        self.provider.authenticator().auth_info()
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::ResolverClosed)
        } else {
            Ok(())
        }
    }
}

impl Drop for ResourceResolver {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Closing resolver on drop: {e}");
        }
    }
}

fn non_existing(path: String, parameters: Parameters) -> Resource {
    let mut resource = Resource::non_existing(path.clone());
    let metadata = resource.metadata_mut();
    metadata.resolution_path_info = path.find('.').map(|index| path[index..].to_string());
    metadata.resolution_path = Some(path);
    metadata.parameters = parameters;
    resource
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::test_util::{CountingProvider, EchoParametersProvider, FailingLoginProvider};
    use crate::provider::{
        AuthType, InMemoryResourceProvider, ProviderInfo, ResourceProvider, ResourceProviderTracker,
    };
    use crate::resource::RESOURCE_TYPE_NON_EXISTING;

    fn tracker(mounts: Vec<(ProviderInfo, Arc<dyn ResourceProvider>)>) -> ResourceProviderTracker {
        let tracker = ResourceProviderTracker::new();
        for (info, provider) in mounts {
            tracker.register(info, provider).unwrap();
        }
        tracker
    }

    fn content() -> Arc<dyn ResourceProvider> {
        Arc::new(
            InMemoryResourceProvider::new()
                .with_resource(Resource::new("/", "root"))
                .with_resource(Resource::new("/content", "folder"))
                .with_resource(Resource::new("/content/page", "page"))
                .with_resource(Resource::new("/content/page.v2", "page")),
        )
    }

    fn resolver() -> ResourceResolver {
        let tracker = tracker(vec![(ProviderInfo::new("/"), content())]);
        ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap()
    }

    #[test]
    fn test_resolve_exact_path() {
        let mut resolver = resolver();
        let resource = resolver.resolve("/content/page").unwrap();
        assert_eq!(resource.path(), "/content/page");
        assert_eq!(
            resource.metadata().resolution_path.as_deref(),
            Some("/content/page")
        );
        assert_eq!(resource.metadata().resolution_path_info.as_deref(), Some(""));
    }

    #[test]
    fn test_resolve_with_selectors_and_suffix() {
        let mut resolver = resolver();
        let resource = resolver.resolve("/content/page.print.html/a/b").unwrap();
        assert_eq!(resource.path(), "/content/page");
        assert_eq!(
            resource.metadata().resolution_path_info.as_deref(),
            Some(".print.html/a/b")
        );
    }

    #[test]
    fn test_resolve_prefers_longest_candidate() {
        let mut resolver = resolver();
        let resource = resolver.resolve("/content/page.v2.html").unwrap();
        assert_eq!(resource.path(), "/content/page.v2");
        assert_eq!(
            resource.metadata().resolution_path_info.as_deref(),
            Some(".html")
        );
    }

    #[test]
    fn test_resolve_relative_and_unnormalized() {
        let mut resolver = resolver();
        assert_eq!(resolver.resolve("content//page.html").unwrap().path(), "/content/page");
        assert_eq!(
            resolver.resolve("/content/x/../page.html").unwrap().path(),
            "/content/page"
        );
    }

    #[test]
    fn test_resolve_carries_parameters() {
        let mut resolver = resolver();
        let resource = resolver.resolve("/content/page;v='1.0'.html").unwrap();
        assert_eq!(resource.path(), "/content/page");
        assert_eq!(resource.metadata().parameters.get("v"), Some("1.0"));
        assert_eq!(
            resource.metadata().resolution_path_info.as_deref(),
            Some(".html")
        );
    }

    #[test]
    fn test_parameters_reach_provider() {
        let tracker = tracker(vec![(ProviderInfo::new("/"), Arc::new(EchoParametersProvider))]);
        let mut resolver = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();
        let resource = resolver.resolve("/x;a=1;b=2").unwrap();
        assert_eq!(resource.property("parameters"), Some(";a=1;b=2"));
    }

    #[test]
    fn test_resolve_miss_yields_non_existing() {
        let tracker = tracker(vec![(ProviderInfo::new("/content"), content())]);
        let mut resolver = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();

        let resource = resolver.resolve("/nothing/here.sel.html;x=1").unwrap();
        assert!(resource.is_non_existing());
        assert_eq!(resource.resource_type(), RESOURCE_TYPE_NON_EXISTING);
        assert_eq!(resource.path(), "/nothing/here.sel.html");
        assert_eq!(
            resource.metadata().resolution_path_info.as_deref(),
            Some(".sel.html")
        );
        assert_eq!(resource.metadata().parameters.get("x"), Some("1"));

        let resource = resolver.resolve("/nothing").unwrap();
        assert!(resource.metadata().resolution_path_info.is_none());
    }

    #[test]
    fn test_resolve_never_lands_on_synthetic() {
        let sub = InMemoryResourceProvider::new().with_resource(Resource::new("/some/path", "t"));
        let tracker = tracker(vec![(ProviderInfo::new("/some/path"), Arc::new(sub))]);
        let mut resolver = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();

        assert!(resolver.resolve("/some.html").unwrap().is_non_existing());
        assert!(resolver.get_resource("/some").unwrap().unwrap().is_synthetic());
    }

    #[test]
    fn test_get_resource() {
        let mut resolver = resolver();
        assert!(resolver.get_resource("/content/page").unwrap().is_some());
        assert!(resolver.get_resource("/content/./page/").unwrap().is_some());
        assert!(resolver.get_resource("/content/page.html").unwrap().is_none());
        assert!(resolver.get_resource("/..").unwrap().is_none());
        assert!(matches!(
            resolver.get_resource("content"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_children_and_parent() {
        let mut resolver = resolver();
        let content = resolver.get_resource("/content").unwrap().unwrap();
        let mut children: Vec<_> = resolver
            .list_children(&content)
            .unwrap()
            .map(|r| r.path().to_string())
            .collect();
        children.sort();
        assert_eq!(children, vec!["/content/page", "/content/page.v2"]);

        let parent = resolver.get_parent(&content).unwrap().unwrap();
        assert_eq!(parent.path(), "/");
    }

    #[test]
    fn test_login_failure_logs_out_earlier_sessions() {
        let ok = Arc::new(CountingProvider::new());
        let tracker = tracker(vec![
            (
                ProviderInfo::new("/a/b").with_auth_type(AuthType::Required),
                ok.clone(),
            ),
            (
                ProviderInfo::new("/a").with_auth_type(AuthType::Required),
                Arc::new(FailingLoginProvider),
            ),
        ]);

        let err = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap_err();
        assert!(err.is_login_failure());
        assert_eq!(ok.logins(), 1);
        assert_eq!(ok.logouts(), 1);
    }

    #[test]
    fn test_close_is_idempotent_and_final() {
        let provider = Arc::new(CountingProvider::new().with_resource(Resource::new("/x", "t")));
        let tracker = tracker(vec![(
            ProviderInfo::new("/").with_auth_type(AuthType::Required),
            provider.clone(),
        )]);
        let mut resolver = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();
        assert!(resolver.is_live());

        resolver.close().unwrap();
        resolver.close().unwrap();
        assert!(resolver.is_closed());
        assert!(!resolver.is_live());
        assert_eq!(provider.logouts(), 1);

        assert!(resolver.resolve("/x").unwrap_err().is_closed());
        assert!(resolver.get_resource("/x").unwrap_err().is_closed());
        assert!(resolver
            .list_children(&Resource::synthetic("/"))
            .unwrap_err()
            .is_closed());
        assert!(resolver.attribute_names().unwrap_err().is_closed());

        drop(resolver);
        assert_eq!(provider.logouts(), 1);
    }

    #[test]
    fn test_drop_closes() {
        let provider = Arc::new(CountingProvider::new());
        let tracker = tracker(vec![(
            ProviderInfo::new("/").with_auth_type(AuthType::Required),
            provider.clone(),
        )]);
        {
            let _resolver = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();
            assert_eq!(provider.logins(), 1);
        }
        assert_eq!(provider.logouts(), 1);
    }

    #[test]
    fn test_resolver_keeps_its_snapshot() {
        let tracker = tracker(vec![(ProviderInfo::new("/"), content())]);
        let mut resolver = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();

        let late = InMemoryResourceProvider::new().with_resource(Resource::new("/late", "t"));
        tracker.register(ProviderInfo::new("/late"), Arc::new(late)).unwrap();

        assert!(resolver.get_resource("/late").unwrap().is_none());
        let mut fresh = ResourceResolver::new(tracker.storage(), AuthenticationInfo::new()).unwrap();
        assert!(fresh.get_resource("/late").unwrap().is_some());
    }

    #[test]
    fn test_attributes_hide_password() {
        let provider = CountingProvider::new().with_attribute("provider.attr", "value");
        let tracker = tracker(vec![(
            ProviderInfo::new("/").with_attributes(true),
            Arc::new(provider),
        )]);
        let auth_info = AuthenticationInfo::from([
            (USER.to_string(), "admin".to_string()),
            (PASSWORD.to_string(), "secret".to_string()),
        ]);
        let mut resolver = ResourceResolver::new(tracker.storage(), auth_info).unwrap();

        assert_eq!(resolver.user_id(), Some("admin"));
        let names = resolver.attribute_names().unwrap();
        assert_eq!(names, vec!["provider.attr", USER]);
        assert_eq!(resolver.attribute(USER).unwrap().as_deref(), Some("admin"));
        assert_eq!(
            resolver.attribute("provider.attr").unwrap().as_deref(),
            Some("value")
        );
        assert_eq!(resolver.attribute(PASSWORD).unwrap(), None);
    }
}
