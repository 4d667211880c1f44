//! Type definitions for parsed request paths.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Matrix parameters extracted from a request path.
///
/// Parameters keep their insertion order. Inserting a name that is already
/// present replaces its value in place, so the last value wins while the
/// first position is kept.
///
/// # Examples
///
/// ```
/// use sling::Parameters;
///
/// let mut params = Parameters::new();
/// params.insert("foo", "bar");
/// params.insert("a", "1");
/// params.insert("foo", "baz");
///
/// assert_eq!(params.get("foo"), Some("baz"));
/// let names: Vec<_> = params.iter().map(|(k, _)| k).collect();
/// assert_eq!(names, vec!["foo", "a"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a parameter, replacing the value of an existing name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value for a parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if a parameter with this name is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl IntoIterator for Parameters {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, ";{name}={value}")?;
        }
        Ok(())
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A request path with its matrix parameters separated out.
///
/// # Examples
///
/// ```
/// use sling::PathParser;
///
/// let parsed = PathParser::parse("/a/b;foo=bar.html/suffix");
/// assert_eq!(parsed.path(), "/a/b.html/suffix");
/// assert_eq!(parsed.parameters().get("foo"), Some("bar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParsedPath {
    path: String,
    parameters: Parameters,
}

impl ParsedPath {
    pub(crate) fn new(path: String, parameters: Parameters) -> Self {
        Self { path, parameters }
    }

    /// Returns the path with the parameter block removed.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the extracted parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Consumes the parsed path, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (String, Parameters) {
        (self.path, self.parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_last_value_wins_first_position_kept() {
        let mut params = Parameters::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("3"));
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_empty_parameters() {
        let params = Parameters::default();
        assert!(params.is_empty());
        assert_eq!(params.get("a"), None);
        assert!(!params.contains_key("a"));
    }

    #[test]
    fn test_from_iterator() {
        let params: Parameters = vec![("x", "1"), ("y", "")].into_iter().collect();
        assert!(params.contains_key("y"));
        assert_eq!(params.get("y"), Some(""));
    }

    #[test]
    fn test_display_renders_matrix_block() {
        let params: Parameters = vec![("foo", "bar"), ("n", "1")].into_iter().collect();
        assert_eq!(params.to_string(), ";foo=bar;n=1");
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let params: Parameters = vec![("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn test_parsed_path_parts() {
        let parsed = ParsedPath::new("/a".to_string(), Parameters::new());
        assert_eq!(parsed.path(), "/a");
        let (path, params) = parsed.into_parts();
        assert_eq!(path, "/a");
        assert!(params.is_empty());
    }
}
