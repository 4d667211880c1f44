//! Resources and their metadata.
//!
//! A [`Resource`] is the unit of addressable content. Resources are either
//! returned by a resource provider, fabricated as synthetic placeholders for
//! intermediate paths above a mount point, or produced by the resolver as a
//! non-existing marker when a request path could not be resolved.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::path::{normalize, Parameters};

/// Resource type of synthetic resources created for intermediate paths.
pub const RESOURCE_TYPE_SYNTHETIC: &str = "sling:syntheticResourceProviderResource";

/// Resource type of the resource returned when resolution finds nothing.
pub const RESOURCE_TYPE_NON_EXISTING: &str = "sling:nonexisting";

/// Where a resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Returned by a resource provider.
    Real,
    /// Fabricated for a path that exists only because something is mounted
    /// below it.
    Synthetic,
    /// Returned by request resolution when no resource matched.
    NonExisting,
}

/// Resolution metadata attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceMetadata {
    /// The part of the request path that addressed this resource.
    pub resolution_path: Option<String>,
    /// The remainder of the request path (selectors, extension, suffix).
    pub resolution_path_info: Option<String>,
    /// Matrix parameters extracted from the request path.
    pub parameters: Parameters,
    /// Root of the provider that produced the resource.
    pub provider_root: Option<String>,
}

/// An addressable piece of content.
///
/// # Examples
///
/// ```
/// use sling::Resource;
///
/// let resource = Resource::new("/content/page", "app/page")
///     .with_property("title", "Welcome");
///
/// assert_eq!(resource.name(), "page");
/// assert_eq!(resource.property("title"), Some("Welcome"));
/// assert!(!resource.is_synthetic());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    path: String,
    resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_super_type: Option<String>,
    properties: BTreeMap<String, String>,
    metadata: ResourceMetadata,
    kind: ResourceKind,
}

impl Resource {
    /// Creates a provider-backed resource.
    #[must_use]
    pub fn new(path: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            resource_type: resource_type.into(),
            resource_super_type: None,
            properties: BTreeMap::new(),
            metadata: ResourceMetadata::default(),
            kind: ResourceKind::Real,
        }
    }

    /// Creates a synthetic placeholder resource for an intermediate path.
    ///
    /// # Examples
    ///
    /// ```
    /// use sling::resource::{Resource, RESOURCE_TYPE_SYNTHETIC};
    ///
    /// let resource = Resource::synthetic("/some");
    /// assert!(resource.is_synthetic());
    /// assert_eq!(resource.resource_type(), RESOURCE_TYPE_SYNTHETIC);
    /// ```
    #[must_use]
    pub fn synthetic(path: impl Into<String>) -> Self {
        let path = path.into();
        let mut resource = Self::new(path.clone(), RESOURCE_TYPE_SYNTHETIC);
        resource.kind = ResourceKind::Synthetic;
        resource.metadata.resolution_path = Some(path);
        resource
    }

    /// Creates the marker returned when request resolution finds nothing.
    #[must_use]
    pub fn non_existing(path: impl Into<String>) -> Self {
        let mut resource = Self::new(path, RESOURCE_TYPE_NON_EXISTING);
        resource.kind = ResourceKind::NonExisting;
        resource
    }

    /// Sets the resource super type.
    #[must_use]
    pub fn with_super_type(mut self, super_type: impl Into<String>) -> Self {
        self.resource_super_type = Some(super_type.into());
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Returns the absolute path of the resource.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the last segment of the path.
    #[must_use]
    pub fn name(&self) -> String {
        normalize::name(&self.path)
    }

    /// Returns the parent path, or `None` for the root.
    #[must_use]
    pub fn parent_path(&self) -> Option<String> {
        normalize::parent(&self.path)
    }

    /// Returns the resource type.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the resource super type, if any.
    #[must_use]
    pub fn resource_super_type(&self) -> Option<&str> {
        self.resource_super_type.as_deref()
    }

    /// Returns all properties.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Returns a single property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Returns the resolution metadata.
    #[must_use]
    pub fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    /// Returns the resolution metadata for modification.
    pub fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.metadata
    }

    /// Returns where the resource came from.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns `true` for synthetic placeholder resources.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.kind == ResourceKind::Synthetic
    }

    /// Returns `true` for the marker produced by failed resolution.
    #[must_use]
    pub fn is_non_existing(&self) -> bool {
        self.kind == ResourceKind::NonExisting
    }
}
