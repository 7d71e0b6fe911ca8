//! Probing a value by key, index or path without failing.
//!
//! A lookup yields [`LookupResult::Defined`] with the value found, or
//! [`LookupResult::Undefined`] telling whether the path is missing or a value
//! along the way had the wrong type. Undefined results absorb further steps,
//! so lookups can be chained without checking each one.
//!
//! Type mismatches are reported at the location of the value that has the
//! wrong type (the parent), while missing keys and indexes are reported at
//! the location that would have held the value (the child).

use crate::location::{Location, PathElement};
use crate::path::JsPath;
use crate::value::{JsType, JsValue};

/// Why a lookup did not find a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undefined {
    /// The container had no such key or index.
    PathMissing {
        /// The location the value was expected at.
        location: Location,
    },
    /// A value along the path was not the expected container type.
    InvalidType {
        /// The location of the mismatched value.
        location: Location,
        /// The container type the step required.
        expected: JsType,
        /// The type actually found.
        actual: JsType,
    },
}

impl Undefined {
    /// Returns the location this outcome is reported at.
    pub fn location(&self) -> &Location {
        match self {
            Undefined::PathMissing { location } => location,
            Undefined::InvalidType { location, .. } => location,
        }
    }
}

/// The outcome of probing a value.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<'a> {
    /// A value exists at the location.
    Defined {
        /// Where the value was found.
        location: Location,
        /// The value found.
        value: &'a JsValue,
    },
    /// No value could be reached.
    Undefined(Undefined),
}

impl<'a> LookupResult<'a> {
    /// Returns true if a value was found.
    pub fn is_defined(&self) -> bool {
        matches!(self, LookupResult::Defined { .. })
    }

    /// Returns true if the lookup stopped at a type mismatch.
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, LookupResult::Undefined(Undefined::InvalidType { .. }))
    }

    /// Returns the location the result refers to.
    pub fn location(&self) -> &Location {
        match self {
            LookupResult::Defined { location, .. } => location,
            LookupResult::Undefined(undefined) => undefined.location(),
        }
    }

    /// Applies one more path element.
    ///
    /// A missing result extends its location with the element; a type
    /// mismatch is returned unchanged.
    pub fn apply(self, element: &PathElement) -> LookupResult<'a> {
        match self {
            LookupResult::Defined { location, value } => value.lookup_element(&location, element),
            LookupResult::Undefined(Undefined::PathMissing { location }) => {
                LookupResult::Undefined(Undefined::PathMissing {
                    location: location.append(element.clone()),
                })
            }
            invalid @ LookupResult::Undefined(Undefined::InvalidType { .. }) => invalid,
        }
    }

    /// Applies a key step. See [`LookupResult::apply`].
    pub fn apply_key(self, key: &str) -> LookupResult<'a> {
        self.apply(&PathElement::Key(key.to_string()))
    }

    /// Applies an index step. See [`LookupResult::apply`].
    pub fn apply_index(self, idx: usize) -> LookupResult<'a> {
        self.apply(&PathElement::Index(idx))
    }
}

impl JsValue {
    /// Looks up `key` in this value, which sits at `location`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assay::{JsValue, Location, LookupResult};
    ///
    /// let value = JsValue::parse(r#"{"name": "alice"}"#).unwrap();
    /// match value.lookup_key(&Location::root(), "name") {
    ///     LookupResult::Defined { location, value } => {
    ///         assert_eq!(location.to_string(), "#/name");
    ///         assert_eq!(value.as_str(), Some("alice"));
    ///     }
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn lookup_key<'a>(&'a self, location: &Location, key: &str) -> LookupResult<'a> {
        match self {
            JsValue::Struct(fields) => match fields.get(key) {
                Some(value) => LookupResult::Defined {
                    location: location.key(key),
                    value,
                },
                None => LookupResult::Undefined(Undefined::PathMissing {
                    location: location.key(key),
                }),
            },
            other => LookupResult::Undefined(Undefined::InvalidType {
                location: location.clone(),
                expected: JsType::Object,
                actual: other.js_type(),
            }),
        }
    }

    /// Looks up index `idx` in this value, which sits at `location`.
    pub fn lookup_index<'a>(&'a self, location: &Location, idx: usize) -> LookupResult<'a> {
        match self {
            JsValue::Array(items) => match items.get(idx) {
                Some(value) => LookupResult::Defined {
                    location: location.index(idx),
                    value,
                },
                None => LookupResult::Undefined(Undefined::PathMissing {
                    location: location.index(idx),
                }),
            },
            other => LookupResult::Undefined(Undefined::InvalidType {
                location: location.clone(),
                expected: JsType::Array,
                actual: other.js_type(),
            }),
        }
    }

    /// Looks up a single path element in this value, which sits at `location`.
    pub fn lookup_element<'a>(&'a self, location: &Location, element: &PathElement) -> LookupResult<'a> {
        match element {
            PathElement::Key(key) => self.lookup_key(location, key),
            PathElement::Index(idx) => self.lookup_index(location, *idx),
        }
    }

    /// Follows every element of `path` starting from this value, which sits at `location`.
    ///
    /// The traversal is a loop, so path depth is bounded by memory only.
    pub fn lookup_path<'a>(&'a self, location: &Location, path: &JsPath) -> LookupResult<'a> {
        let mut result = LookupResult::Defined {
            location: location.clone(),
            value: self,
        };
        for element in path.elements() {
            result = result.apply(element);
        }
        result
    }
}
