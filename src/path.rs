//! Relative paths used to declare where a property lives inside a struct.
//!
//! A [`JsPath`] is a non-empty sequence of [`PathElement`]s applied to a
//! source value. [`PropertyPaths`] groups a primary path with alternatives
//! (renamed or legacy fields) that are tried in order.

use std::fmt::{self, Display};

use crate::location::{Location, PathElement};
use crate::lookup::{LookupResult, Undefined};
use crate::value::JsValue;

/// A non-empty relative path into a value.
///
/// # Example
///
/// ```rust
/// use assay::JsPath;
///
/// let path = JsPath::key("user").then_key("phones").then_index(0);
/// assert_eq!(path.to_string(), "/user/phones[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsPath {
    head: PathElement,
    tail: Vec<PathElement>,
}

impl JsPath {
    /// Creates a path whose first element is the given element.
    pub fn new(element: impl Into<PathElement>) -> Self {
        Self {
            head: element.into(),
            tail: Vec::new(),
        }
    }

    /// Creates a path starting with a key.
    pub fn key(name: impl Into<String>) -> Self {
        Self::new(PathElement::Key(name.into()))
    }

    /// Creates a path starting with an index.
    pub fn index(idx: usize) -> Self {
        Self::new(PathElement::Index(idx))
    }

    /// Returns a new path with a key appended.
    pub fn then_key(&self, name: impl Into<String>) -> Self {
        self.then(PathElement::Key(name.into()))
    }

    /// Returns a new path with an index appended.
    pub fn then_index(&self, idx: usize) -> Self {
        self.then(PathElement::Index(idx))
    }

    fn then(&self, element: PathElement) -> Self {
        let mut tail = self.tail.clone();
        tail.push(element);
        Self {
            head: self.head.clone(),
            tail,
        }
    }

    /// Returns the first element of the path.
    pub fn head(&self) -> &PathElement {
        &self.head
    }

    /// Returns an iterator over all elements, head first.
    pub fn elements(&self) -> impl Iterator<Item = &PathElement> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Returns the number of elements (always at least one).
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always false; a path has at least one element.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<&str> for JsPath {
    fn from(name: &str) -> Self {
        JsPath::key(name)
    }
}

impl From<String> for JsPath {
    fn from(name: String) -> Self {
        JsPath::key(name)
    }
}

impl From<usize> for JsPath {
    fn from(idx: usize) -> Self {
        JsPath::index(idx)
    }
}

impl Display for JsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in self.elements() {
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

/// The path of a struct property: a primary path plus ordered alternatives.
///
/// Resolution tries every path. The first one that is defined wins. When none
/// is defined, a type mismatch along any path is reported (the first one), and
/// otherwise the primary path is reported as missing.
///
/// # Example
///
/// ```rust
/// use assay::{JsValue, Location, PropertyPaths};
///
/// let paths = PropertyPaths::new("user_name").or("userName");
/// let source = JsValue::parse(r#"{"userName": "alice"}"#).unwrap();
///
/// let lookup = paths.lookup(&Location::root(), &source);
/// assert!(lookup.is_defined());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPaths {
    primary: JsPath,
    alternatives: Vec<JsPath>,
}

impl PropertyPaths {
    /// Creates property paths from the primary path.
    pub fn new(primary: impl Into<JsPath>) -> Self {
        Self {
            primary: primary.into(),
            alternatives: Vec::new(),
        }
    }

    /// Adds an alternative path, tried after the ones already declared.
    pub fn or(mut self, alternative: impl Into<JsPath>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    /// Returns the primary path.
    pub fn primary(&self) -> &JsPath {
        &self.primary
    }

    /// Returns every path, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &JsPath> {
        std::iter::once(&self.primary).chain(self.alternatives.iter())
    }

    /// Returns the top-level key of each path, skipping paths that start with an index.
    pub fn head_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|path| match path.head() {
            PathElement::Key(name) => Some(name.as_str()),
            PathElement::Index(_) => None,
        })
    }

    /// Resolves these paths against `source`, which sits at `location`.
    pub fn lookup<'a>(&self, location: &Location, source: &'a JsValue) -> LookupResult<'a> {
        let mut fallback = source.lookup_path(location, &self.primary);
        if fallback.is_defined() {
            return fallback;
        }

        for path in &self.alternatives {
            let result = source.lookup_path(location, path);
            match &result {
                LookupResult::Defined { .. } => return result,
                LookupResult::Undefined(Undefined::InvalidType { .. }) => {
                    if !fallback.is_invalid_type() {
                        fallback = result;
                    }
                }
                LookupResult::Undefined(Undefined::PathMissing { .. }) => {}
            }
        }

        fallback
    }
}

impl From<&str> for PropertyPaths {
    fn from(name: &str) -> Self {
        PropertyPaths::new(name)
    }
}

impl From<String> for PropertyPaths {
    fn from(name: String) -> Self {
        PropertyPaths::new(name)
    }
}

impl From<JsPath> for PropertyPaths {
    fn from(path: JsPath) -> Self {
        PropertyPaths::new(path)
    }
}

impl Display for PropertyPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsType;

    fn source(text: &str) -> JsValue {
        JsValue::parse(text).unwrap()
    }

    #[test]
    fn test_path_display() {
        assert_eq!(JsPath::key("a").to_string(), "/a");
        assert_eq!(JsPath::index(2).then_key("b").to_string(), "[2]/b");
    }

    #[test]
    fn test_path_is_never_empty() {
        let path = JsPath::key("a");
        assert_eq!(path.len(), 1);
        assert!(!path.is_empty());
        assert_eq!(path.then_index(0).len(), 2);
    }

    #[test]
    fn test_primary_path_wins_when_defined() {
        let paths = PropertyPaths::new("name").or("title");
        let value = source(r#"{"name": "a", "title": "b"}"#);

        match paths.lookup(&Location::root(), &value) {
            LookupResult::Defined { location, value } => {
                assert_eq!(location.to_string(), "#/name");
                assert_eq!(value.as_str(), Some("a"));
            }
            other => panic!("expected defined, got {:?}", other),
        }
    }

    #[test]
    fn test_alternative_used_when_primary_missing() {
        let paths = PropertyPaths::new("name").or("title");
        let value = source(r#"{"title": "b"}"#);

        match paths.lookup(&Location::root(), &value) {
            LookupResult::Defined { location, .. } => assert_eq!(location.to_string(), "#/title"),
            other => panic!("expected defined, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_everywhere_reports_primary() {
        let paths = PropertyPaths::new("name").or("title");
        let value = source("{}");

        match paths.lookup(&Location::root(), &value) {
            LookupResult::Undefined(Undefined::PathMissing { location }) => {
                assert_eq!(location.to_string(), "#/name")
            }
            other => panic!("expected path missing, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_type_on_alternative_is_reported() {
        let paths = PropertyPaths::new("name").or(JsPath::key("legacy").then_key("name"));
        let value = source(r#"{"legacy": 1}"#);

        match paths.lookup(&Location::root(), &value) {
            LookupResult::Undefined(Undefined::InvalidType {
                location,
                expected,
                actual,
            }) => {
                assert_eq!(location.to_string(), "#/legacy");
                assert_eq!(expected, JsType::Object);
                assert_eq!(actual, JsType::Number);
            }
            other => panic!("expected invalid type, got {:?}", other),
        }
    }

    #[test]
    fn test_head_keys_skip_index_heads() {
        let paths = PropertyPaths::new("a")
            .or(JsPath::index(0))
            .or(JsPath::key("b").then_key("c"));
        let keys: Vec<_> = paths.head_keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
