//! Resource path normalization.
//!
//! Resource paths are `/`-separated strings independent of the host file
//! system. This module resolves `.` and `..` segments, collapses duplicate
//! separators and strips trailing separators, and provides the parent and
//! name helpers built on top of it.

/// Normalize a resource path.
///
/// Resolves `.` and `..` segments, removes empty segments and drops any
/// trailing `/`. Absolute paths stay absolute and relative paths stay
/// relative. The empty string normalizes to itself.
///
/// Returns `None` if a `..` segment would climb above the first segment.
///
/// # Examples
///
/// ```
/// use sling::path::normalize::normalize;
///
/// assert_eq!(normalize("/a/./b/../c/").as_deref(), Some("/a/c"));
/// assert_eq!(normalize("//a//b").as_deref(), Some("/a/b"));
/// assert_eq!(normalize("/a/..").as_deref(), Some("/"));
/// assert_eq!(normalize("a/b/..").as_deref(), Some("a"));
/// assert_eq!(normalize("/.."), None);
/// ```
#[must_use]
pub fn normalize(path: &str) -> Option<String> {
    if path.is_empty() {
        return Some(String::new());
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }

    let joined = segments.join("/");
    if is_absolute(path) {
        Some(format!("/{joined}"))
    } else {
        Some(joined)
    }
}

/// Returns `true` if the path starts at the root.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Returns the parent of a path.
///
/// The path is normalized first. Returns `None` for the root, for a single
/// relative segment, and for paths that cannot be normalized.
///
/// # Examples
///
/// ```
/// use sling::path::normalize::parent;
///
/// assert_eq!(parent("/a/b").as_deref(), Some("/a"));
/// assert_eq!(parent("/a").as_deref(), Some("/"));
/// assert_eq!(parent("/"), None);
/// assert_eq!(parent("a"), None);
/// ```
#[must_use]
pub fn parent(path: &str) -> Option<String> {
    let normalized = normalize(path)?;
    if normalized == "/" {
        return None;
    }
    match normalized.rfind('/') {
        None => None,
        Some(0) => Some("/".to_string()),
        Some(idx) => Some(normalized[..idx].to_string()),
    }
}

/// Returns the last segment of a path.
///
/// The root and paths that cannot be normalized have an empty name.
///
/// # Examples
///
/// ```
/// use sling::path::normalize::name;
///
/// assert_eq!(name("/a/b.html"), "b.html");
/// assert_eq!(name("/"), "");
/// ```
#[must_use]
pub fn name(path: &str) -> String {
    let Some(normalized) = normalize(path) else {
        return String::new();
    };
    match normalized.rfind('/') {
        Some(idx) => normalized[idx + 1..].to_string(),
        None => normalized,
    }
}

/// Joins a child name onto a parent path.
#[must_use]
pub fn join(parent: &str, child: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}
