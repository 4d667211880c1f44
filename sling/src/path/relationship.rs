//! Path relationship checking.
//!
//! This module determines how two resource paths relate in the resource
//! tree. Comparison is segment-aware: `/a` is an ancestor of `/a/b` but is
//! unrelated to `/ab`.

/// Relationship between two resource paths.
///
/// # Examples
///
/// ```
/// use sling::path::PathRelationship;
///
/// assert_eq!(
///     PathRelationship::between("/content", "/content/page"),
///     PathRelationship::Ancestor
/// );
/// assert_eq!(
///     PathRelationship::between("/content", "/contents"),
///     PathRelationship::Unrelated
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same.
    ///
    /// Trailing separators are ignored.
    Same,

    /// Neither path is an ancestor or descendant of the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Both paths are compared with trailing separators removed. Paths are
    /// expected to be normalized already.
    ///
    /// # Examples
    ///
    /// ```
    /// use sling::path::PathRelationship;
    ///
    /// assert_eq!(PathRelationship::between("/a/b", "/a"), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between("/a/", "/a"), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between("/", "/a"), PathRelationship::Ancestor);
    /// assert_eq!(PathRelationship::between("/a", "/b"), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &str, path2: &str) -> Self {
        let p1 = trim_trailing_separator(path1);
        let p2 = trim_trailing_separator(path2);

        if p1 == p2 {
            Self::Same
        } else if is_strict_prefix(p1, p2) {
            Self::Ancestor
        } else if is_strict_prefix(p2, p1) {
            Self::Descendant
        } else {
            Self::Unrelated
        }
    }

    /// Check if the relationship is hierarchical (not unrelated).
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if a path is within another (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use sling::path::PathRelationship;
    ///
    /// assert!(PathRelationship::is_within("/a/b", "/a"));
    /// assert!(PathRelationship::is_within("/a", "/a"));
    /// assert!(!PathRelationship::is_within("/ab", "/a"));
    /// ```
    #[must_use]
    pub fn is_within(path: &str, root: &str) -> bool {
        matches!(Self::between(path, root), Self::Descendant | Self::Same)
    }

    /// Check if a path contains another path (ancestor or same).
    #[must_use]
    pub fn contains(path: &str, other: &str) -> bool {
        matches!(Self::between(path, other), Self::Ancestor | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &str, path2: &str) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}

fn trim_trailing_separator(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// `ancestor` is a strict, segment-aligned prefix of `path`.
fn is_strict_prefix(ancestor: &str, path: &str) -> bool {
    if ancestor == "/" {
        return path.len() > 1 && path.starts_with('/');
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}
