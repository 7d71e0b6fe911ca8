//! Locations of values inside a JSON document.
//!
//! This module provides [`Location`] and [`PathElement`] for addressing a
//! node from the document root. Every error cause carries a location, and
//! locations print as `#/user/phones[0]`.

use std::fmt::{self, Display};

/// A single step in a location or path.
///
/// Steps are either a struct key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// A struct key (e.g., `user`, `email`)
    Key(String),
    /// An array index (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathElement {
    /// Creates a new key element.
    pub fn key(name: impl Into<String>) -> Self {
        PathElement::Key(name.into())
    }

    /// Creates a new index element.
    pub fn index(idx: usize) -> Self {
        PathElement::Index(idx)
    }
}

impl From<&str> for PathElement {
    fn from(name: &str) -> Self {
        PathElement::Key(name.to_string())
    }
}

impl From<String> for PathElement {
    fn from(name: String) -> Self {
        PathElement::Key(name)
    }
}

impl From<usize> for PathElement {
    fn from(idx: usize) -> Self {
        PathElement::Index(idx)
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(name) => write!(f, "/{}", name),
            PathElement::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// The position of a node in a JSON document, relative to the root.
///
/// `Location` is immutable: every `append` returns a new location and leaves
/// the original untouched. Equality and hashing are structural over the
/// element sequence, so locations can be used as map keys.
///
/// # Example
///
/// ```rust
/// use assay::Location;
///
/// let location = Location::root()
///     .key("user")
///     .key("phones")
///     .index(0);
///
/// assert_eq!(location.to_string(), "#/user/phones[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    elements: Vec<PathElement>,
}

impl Location {
    /// Creates the root location, printed as `#`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new location with the element appended.
    pub fn append(&self, element: impl Into<PathElement>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(element.into());
        Self { elements }
    }

    /// Returns a new location with a key element appended.
    pub fn key(&self, name: impl Into<String>) -> Self {
        self.append(PathElement::Key(name.into()))
    }

    /// Returns a new location with an index element appended.
    pub fn index(&self, idx: usize) -> Self {
        self.append(PathElement::Index(idx))
    }

    /// Returns a new location with every element of `elements` appended in order.
    pub fn append_all<'a>(&self, elements: impl IntoIterator<Item = &'a PathElement>) -> Self {
        let mut extended = self.elements.clone();
        extended.extend(elements.into_iter().cloned());
        Self { elements: extended }
    }

    /// Returns true if this is the root location.
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements in this location.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if this location has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the location elements.
    pub fn elements(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Returns the parent location, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.elements.is_empty() {
            None
        } else {
            Some(Self {
                elements: self.elements[..self.elements.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last element, or None if this is root.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for element in &self.elements {
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}
