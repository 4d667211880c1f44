//! Candidate resource paths for request resolution.

/// Iterates over the resource paths a request path could address.
///
/// The first item is the request path itself (without trailing slashes).
/// Each following item cuts the previous one at its last `.`, so selectors,
/// extensions and dotted suffix segments are peeled off one at a time.
///
/// # Examples
///
/// ```
/// use sling::path::ResourcePathIterator;
///
/// let candidates: Vec<_> = ResourcePathIterator::new("/a/b.sel.html/s.x").collect();
/// assert_eq!(
///     candidates,
///     vec!["/a/b.sel.html/s.x", "/a/b.sel.html/s", "/a/b.sel", "/a/b"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ResourcePathIterator {
    next_path: Option<String>,
}

impl ResourcePathIterator {
    /// Creates an iterator over the candidates for `path`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let next_path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            next_path: Some(next_path),
        }
    }
}

impl Iterator for ResourcePathIterator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let current = self.next_path.take()?;
        self.next_path = match current.rfind('.') {
            Some(dot) if dot > 0 => Some(current[..dot].to_string()),
            _ => None,
        };
        Some(current)
    }
}
