//! The array reader engine.
//!
//! Elements are read by position: the first elements use the prefix-item
//! readers, one per position, and the remaining elements use the common
//! items reader. An array shorter than the prefix is fine. Elements beyond
//! the prefix with no items reader configured are additional items.

use std::fmt;

use stillwater::Validation;
use tracing::trace;

use super::JsReader;
use crate::env::ReaderEnv;
use crate::error::{AdditionalItemsErrorBuilder, InvalidTypeErrorBuilder};
use crate::location::Location;
use crate::result::{FailureAccumulator, JsResult};
use crate::validator::JsValidator;
use crate::value::{JsType, JsValue};

/// Builds an array reader.
///
/// # Example
///
/// ```rust
/// use assay::validator::arrays::{is_unique, max_items};
/// use assay::{readers, ArrayReaderBuilder, DefaultErrorBuilders, JsValue, ReaderEnv};
///
/// let tags = ArrayReaderBuilder::<DefaultErrorBuilders, String>::new()
///     .items(readers::string())
///     .validation(max_items(3))
///     .validation(is_unique(|tag: &String| tag.clone()))
///     .build();
///
/// let env = ReaderEnv::default();
/// let result = tags.read_root(&env, &JsValue::parse(r#"["a", "b"]"#).unwrap());
/// assert_eq!(result.ok(), Some(vec!["a".to_string(), "b".to_string()]));
/// ```
pub struct ArrayReaderBuilder<EB, T> {
    prefix_items: Vec<JsReader<EB, T>>,
    items: Option<JsReader<EB, T>>,
    validators: Vec<JsValidator<EB, Vec<T>>>,
}

impl<EB, T> fmt::Debug for ArrayReaderBuilder<EB, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayReaderBuilder")
            .field("prefix_items", &self.prefix_items.len())
            .field("items", &self.items.is_some())
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<EB, T> Default for ArrayReaderBuilder<EB, T>
where
    EB: InvalidTypeErrorBuilder + AdditionalItemsErrorBuilder + 'static,
    T: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<EB, T> ArrayReaderBuilder<EB, T>
where
    EB: InvalidTypeErrorBuilder + AdditionalItemsErrorBuilder + 'static,
    T: 'static,
{
    /// Creates a builder with no item readers.
    pub fn new() -> Self {
        Self {
            prefix_items: Vec::new(),
            items: None,
            validators: Vec::new(),
        }
    }

    /// Sets the readers for the leading positions, one per position.
    pub fn prefix_items(mut self, readers: Vec<JsReader<EB, T>>) -> Self {
        self.prefix_items = readers;
        self
    }

    /// Sets the reader for every element after the prefix.
    pub fn items(mut self, reader: JsReader<EB, T>) -> Self {
        self.items = Some(reader);
        self
    }

    /// Adds a validator run on the items once every element was read.
    pub fn validation(mut self, validator: JsValidator<EB, Vec<T>>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Builds the reader.
    pub fn build(self) -> JsReader<EB, Vec<T>> {
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            self.read(env, location, source)
        })
    }

    fn reader_at(&self, index: usize) -> Option<&JsReader<EB, T>> {
        self.prefix_items.get(index).or(self.items.as_ref())
    }

    fn read(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<Vec<T>> {
        let elements = match source {
            JsValue::Array(elements) => elements,
            other => {
                return JsResult::fail(
                    location.clone(),
                    env.error_builders().invalid_type_error(JsType::Array, other.js_type()),
                )
            }
        };

        let mut values = Vec::with_capacity(elements.len());
        let mut failures = FailureAccumulator::new();
        for (index, element) in elements.iter().enumerate() {
            let element_location = location.index(index);
            let result = match self.reader_at(index) {
                Some(reader) => reader.read(env, &element_location, element),
                None => JsResult::fail(element_location, env.error_builders().additional_items_error()),
            };
            match result {
                JsResult::Success { value, .. } => values.push(value),
                JsResult::Failure(failure) => {
                    failures.push(failure);
                    if env.fail_fast() {
                        trace!(%location, index, "array read stopped at first failure");
                        break;
                    }
                }
            }
        }
        if let Some(failure) = failures.finish() {
            return JsResult::Failure(failure);
        }

        let mut failures = FailureAccumulator::new();
        for validator in &self.validators {
            if let Validation::Failure(failure) = validator.validate(env, location, &values) {
                failures.push(failure);
                if env.fail_fast() {
                    break;
                }
            }
        }
        match failures.finish() {
            Some(failure) => JsResult::Failure(failure),
            None => JsResult::success(location.clone(), values),
        }
    }
}
