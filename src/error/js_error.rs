//! Read error types.
//!
//! This module provides [`JsError`] for a single error tag, [`Cause`] for the
//! errors found at one location, and [`Failure`] for accumulating causes.

use std::fmt::{self, Display};

use serde_json::{json, Value};
use stillwater::prelude::*;

use crate::location::Location;
use crate::value::JsType;

/// A single error tag.
///
/// Structural errors (`PathMissing`, `InvalidType`) come from lookups,
/// `ValueCast` from primitive readers converting literal text, and the rest
/// from validators. `Custom` carries errors defined by callers.
///
/// # Example
///
/// ```rust
/// use assay::{JsError, JsType};
///
/// let error = JsError::InvalidType {
///     expected: JsType::String,
///     actual: JsType::Number,
/// };
/// assert_eq!(error.code(), "invalid_type");
/// assert_eq!(error.to_string(), "expected string, got number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsError {
    /// No value exists at the location.
    #[error("missing path")]
    PathMissing,

    /// The value has the wrong type.
    #[error("expected {expected}, got {actual}")]
    InvalidType { expected: JsType, actual: JsType },

    /// Literal text cannot be converted to the target type.
    #[error("value '{value}' cannot be converted to {target}")]
    ValueCast { value: String, target: &'static str },

    /// The struct has a key that no property declares.
    #[error("additional property is not allowed")]
    AdditionalProperties,

    /// The array has an element that no item reader covers.
    #[error("additional item is not allowed")]
    AdditionalItems,

    /// The struct has too few keys.
    #[error("struct must have at least {expected} properties, got {actual}")]
    MinProperties { expected: usize, actual: usize },

    /// The struct has too many keys.
    #[error("struct must have at most {expected} properties, got {actual}")]
    MaxProperties { expected: usize, actual: usize },

    /// The array has too few items.
    #[error("array must have at least {expected} items, got {actual}")]
    MinItems { expected: usize, actual: usize },

    /// The array has too many items.
    #[error("array must have at most {expected} items, got {actual}")]
    MaxItems { expected: usize, actual: usize },

    /// An array item repeats the key of an earlier item.
    #[error("item at index {index} duplicates value '{value}'")]
    NonUniqueItem { index: usize, value: String },

    /// The string is shorter than allowed.
    #[error("length must be at least {expected}, got {actual}")]
    MinLength { expected: usize, actual: usize },

    /// The string is longer than allowed.
    #[error("length must be at most {expected}, got {actual}")]
    MaxLength { expected: usize, actual: usize },

    /// The string does not match the pattern.
    #[error("value '{value}' does not match pattern '{pattern}'")]
    Pattern { pattern: String, value: String },

    /// The string is empty or whitespace only.
    #[error("value must not be blank")]
    IsBlank,

    /// The number is below the minimum.
    #[error("value must be at least {expected}, got {actual}")]
    Minimum { expected: String, actual: String },

    /// The number is above the maximum.
    #[error("value must be at most {expected}, got {actual}")]
    Maximum { expected: String, actual: String },

    /// A recursive reader slot was read before being defined.
    #[error("reader '{name}' is referenced but never defined")]
    UnresolvedReference { name: String },

    /// An error defined by the caller.
    #[error("{message}")]
    Custom { code: String, message: String },
}

impl JsError {
    /// Creates a caller-defined error.
    pub fn custom(code: impl Into<String>, message: impl Into<String>) -> Self {
        JsError::Custom {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns a machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            JsError::PathMissing => "path_missing",
            JsError::InvalidType { .. } => "invalid_type",
            JsError::ValueCast { .. } => "value_cast",
            JsError::AdditionalProperties => "additional_property",
            JsError::AdditionalItems => "additional_item",
            JsError::MinProperties { .. } => "min_properties",
            JsError::MaxProperties { .. } => "max_properties",
            JsError::MinItems { .. } => "min_items",
            JsError::MaxItems { .. } => "max_items",
            JsError::NonUniqueItem { .. } => "unique",
            JsError::MinLength { .. } => "min_length",
            JsError::MaxLength { .. } => "max_length",
            JsError::Pattern { .. } => "pattern",
            JsError::IsBlank => "blank",
            JsError::Minimum { .. } => "minimum",
            JsError::Maximum { .. } => "maximum",
            JsError::UnresolvedReference { .. } => "unresolved_reference",
            JsError::Custom { code, .. } => code,
        }
    }
}

/// One location paired with every error found there.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause {
    /// Where the errors were found.
    pub location: Location,
    /// The errors, in the order they were raised.
    pub errors: NonEmptyVec<JsError>,
}

impl Cause {
    /// Creates a cause with a single error.
    pub fn new(location: Location, error: JsError) -> Self {
        Self {
            location,
            errors: NonEmptyVec::singleton(error),
        }
    }

    /// Adds another error at the same location and returns self for chaining.
    pub fn with_error(mut self, error: JsError) -> Self {
        self.errors = self.errors.combine(NonEmptyVec::singleton(error));
        self
    }

    /// Returns the first error.
    pub fn error(&self) -> &JsError {
        self.errors.head()
    }

    /// Returns an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &JsError> {
        self.errors.iter()
    }
}

impl Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.location)?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// A non-empty, ordered collection of causes.
///
/// `Failure` implements `Semigroup`: combining two failures concatenates
/// their causes, keeping order and duplicates.
///
/// ```rust
/// use assay::{Failure, JsError, Location};
/// use stillwater::prelude::*;
///
/// let id = Failure::new(Location::root().key("id"), JsError::PathMissing);
/// let name = Failure::new(Location::root().key("name"), JsError::PathMissing);
///
/// let combined = id.combine(name);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().location.to_string(), "#/id");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failure(NonEmptyVec<Cause>);

impl Failure {
    /// Creates a failure with one cause holding one error.
    pub fn new(location: Location, error: JsError) -> Self {
        Self::from_cause(Cause::new(location, error))
    }

    /// Creates a failure from a single cause.
    pub fn from_cause(cause: Cause) -> Self {
        Self(NonEmptyVec::singleton(cause))
    }

    /// Creates a failure from a `NonEmptyVec` of causes.
    pub fn from_non_empty(causes: NonEmptyVec<Cause>) -> Self {
        Self(causes)
    }

    /// Creates a failure from a vec of causes, or None if the vec is empty.
    pub fn from_vec(causes: Vec<Cause>) -> Option<Self> {
        NonEmptyVec::from_vec(causes).map(Self)
    }

    /// Concatenates the causes of `other` after the causes of `self`.
    pub fn merge(self, other: Failure) -> Self {
        self.combine(other)
    }

    /// Returns the number of causes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a failure holds at least one cause.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the causes.
    pub fn iter(&self) -> impl Iterator<Item = &Cause> {
        self.0.iter()
    }

    /// Returns the first cause.
    pub fn first(&self) -> &Cause {
        self.0.head()
    }

    /// Returns the causes reported at `location`.
    pub fn at_location(&self, location: &Location) -> Vec<&Cause> {
        self.0.iter().filter(|c| &c.location == location).collect()
    }

    /// Returns every error with the given code, paired with its location.
    pub fn with_code(&self, code: &str) -> Vec<(&Location, &JsError)> {
        self.0
            .iter()
            .flat_map(|c| c.errors.iter().map(move |e| (&c.location, e)))
            .filter(|(_, e)| e.code() == code)
            .collect()
    }

    /// Converts this failure into a `Vec<Cause>`.
    pub fn into_vec(self) -> Vec<Cause> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Cause> {
        &self.0
    }

    /// Renders the causes as JSON for error responses.
    ///
    /// Each cause becomes `{"location": "#/id", "errors": [{"code": ..., "message": ...}]}`.
    pub fn to_json(&self) -> Value {
        let causes: Vec<Value> = self
            .0
            .iter()
            .map(|cause| {
                let errors: Vec<Value> = cause
                    .errors
                    .iter()
                    .map(|e| json!({ "code": e.code(), "message": e.to_string() }))
                    .collect();
                json!({ "location": cause.location.to_string(), "errors": errors })
            })
            .collect();
        Value::Array(causes)
    }
}

impl Semigroup for Failure {
    fn combine(self, other: Self) -> Self {
        Failure(self.0.combine(other.0))
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Read failed with {} cause(s):", self.len())?;
        for (i, cause) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

impl IntoIterator for Failure {
    type Item = Cause;
    type IntoIter = std::vec::IntoIter<Cause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Failures cross thread boundaries in batch reads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Failure>();
    assert_sync::<Failure>();
};

/// Malformed JSON text, rejected before any reader runs.
#[derive(Debug, thiserror::Error)]
#[error("malformed JSON: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Errors raised while wiring recursive readers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// The slot already holds a reader.
    #[error("reader '{0}' already defined")]
    AlreadyDefined(String),
}
