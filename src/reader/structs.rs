//! The struct reader engine.
//!
//! A struct reader declares its properties with a [`StructReaderBuilder`],
//! receiving a typed [`PropertyKey`] for each one, and assembles the domain
//! value from the [`PropertyValues`] read.
//!
//! A read runs in this order:
//!
//! 1. The source must be a struct, otherwise the read fails with a type
//!    mismatch at the struct's location.
//! 2. Properties are read in declaration order. In fail-fast mode the first
//!    failure is returned; otherwise every property is read and the failures
//!    are merged in declaration order.
//! 3. If every property was read, struct validators run under the same policy.
//! 4. The assembly function builds the value, returned at the struct's location.
//!
//! # Example
//!
//! ```rust
//! use assay::reader::property;
//! use assay::validator::structs::additional_properties;
//! use assay::{readers, DefaultErrorBuilders, JsValue, ReaderEnv, StructReaderBuilder};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: String,
//!     nickname: Option<String>,
//! }
//!
//! let mut builder = StructReaderBuilder::<DefaultErrorBuilders>::new();
//! let id = builder.property(property::required("id", readers::string()));
//! let nickname = builder.property(property::optional("nickname", readers::string()));
//! builder.validation(additional_properties());
//! let reader = builder.build(move |mut values| User {
//!     id: values.take(id),
//!     nickname: values.take(nickname),
//! });
//!
//! let env = ReaderEnv::default();
//! let user = reader.read_root(&env, &JsValue::parse(r#"{"id": "u1"}"#).unwrap());
//! assert_eq!(user.ok(), Some(User { id: "u1".to_string(), nickname: None }));
//!
//! let failure = reader
//!     .read_root(&env, &JsValue::parse(r#"{"id": "u1", "extra": 1}"#).unwrap())
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(failure.first().location.to_string(), "#/extra");
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stillwater::Validation;
use tracing::{debug, trace};

use super::property::StructProperty;
use super::JsReader;
use crate::env::ReaderEnv;
use crate::error::{InvalidTypeErrorBuilder, JsError};
use crate::location::Location;
use crate::path::PropertyPaths;
use crate::result::{FailureAccumulator, JsResult};
use crate::validator::structs::{Prebuilt, StructValidator, StructValidatorBuilder};
use crate::validator::ValidationResult;
use crate::value::{JsStruct, JsType, JsValue};

static NEXT_READER_ID: AtomicUsize = AtomicUsize::new(0);

/// A typed handle to one declared property of a struct reader.
pub struct PropertyKey<T> {
    reader_id: usize,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for PropertyKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyKey<T> {}

impl<T> fmt::Debug for PropertyKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyKey")
            .field("reader_id", &self.reader_id)
            .field("index", &self.index)
            .finish()
    }
}

/// The values read for each declared property, in declaration order.
pub struct PropertyValues {
    reader_id: usize,
    values: Vec<Option<Box<dyn Any>>>,
}

impl PropertyValues {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            reader_id: usize::MAX,
            values: Vec::new(),
        }
    }

    /// Returns the value read for `key`, or None if `key` belongs to another
    /// reader or the value was already taken.
    pub fn try_get<T: 'static>(&self, key: PropertyKey<T>) -> Option<&T> {
        if key.reader_id != self.reader_id {
            return None;
        }
        self.values.get(key.index)?.as_ref()?.downcast_ref::<T>()
    }

    /// Returns the value read for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was declared on a different struct reader or the value
    /// was already taken.
    pub fn get<T: 'static>(&self, key: PropertyKey<T>) -> &T {
        match self.try_get(key) {
            Some(value) => value,
            None => panic!("no value for {:?}", key),
        }
    }

    /// Moves the value read for `key` out of this collection.
    ///
    /// # Panics
    ///
    /// Panics if `key` was declared on a different struct reader or the value
    /// was already taken.
    pub fn take<T: 'static>(&mut self, key: PropertyKey<T>) -> T {
        let taken = if key.reader_id == self.reader_id {
            self.values.get_mut(key.index).and_then(Option::take)
        } else {
            None
        };
        match taken.map(|value| value.downcast::<T>()) {
            Some(Ok(value)) => *value,
            _ => panic!("no value for {:?}", key),
        }
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the reader declares no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for PropertyValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyValues")
            .field("reader_id", &self.reader_id)
            .field("len", &self.values.len())
            .finish()
    }
}

/// A declared property with its output type erased.
trait ErasedProperty<EB>: Send + Sync {
    fn paths(&self) -> &PropertyPaths;

    fn read_erased(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<Box<dyn Any>>;
}

impl<EB, O: 'static> ErasedProperty<EB> for StructProperty<EB, O> {
    fn paths(&self) -> &PropertyPaths {
        StructProperty::paths(self)
    }

    fn read_erased(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<Box<dyn Any>> {
        self.read(env, location, source).map(|value| Box::new(value) as Box<dyn Any>)
    }
}

/// Declares the properties and struct validators of a struct reader.
pub struct StructReaderBuilder<EB> {
    reader_id: usize,
    properties: Vec<Arc<dyn ErasedProperty<EB>>>,
    validators: Vec<Box<dyn StructValidatorBuilder<EB>>>,
}

impl<EB> fmt::Debug for StructReaderBuilder<EB> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<_> = self.properties.iter().map(|p| p.paths().to_string()).collect();
        f.debug_struct("StructReaderBuilder")
            .field("properties", &paths)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<EB> Default for StructReaderBuilder<EB>
where
    EB: InvalidTypeErrorBuilder + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<EB> StructReaderBuilder<EB>
where
    EB: InvalidTypeErrorBuilder + 'static,
{
    /// Creates a builder with no properties.
    pub fn new() -> Self {
        Self {
            reader_id: NEXT_READER_ID.fetch_add(1, Ordering::Relaxed),
            properties: Vec::new(),
            validators: Vec::new(),
        }
    }

    /// Declares a property and returns the key its value is stored under.
    pub fn property<O: 'static>(&mut self, property: StructProperty<EB, O>) -> PropertyKey<O> {
        let index = self.properties.len();
        self.properties.push(Arc::new(property));
        PropertyKey {
            reader_id: self.reader_id,
            index,
            _marker: PhantomData,
        }
    }

    /// Adds a struct validator, built from the declared properties when the
    /// reader is built.
    pub fn validation(&mut self, validator: impl StructValidatorBuilder<EB> + 'static) -> &mut Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Adds a cross-property check on the values read.
    pub fn custom<F>(&mut self, check: F) -> &mut Self
    where
        F: Fn(&ReaderEnv<EB>, &Location, &PropertyValues) -> ValidationResult + Send + Sync + 'static,
    {
        let validator: Arc<dyn StructValidator<EB>> = Arc::new(
            move |env: &ReaderEnv<EB>, location: &Location, _: &JsStruct, values: &PropertyValues| {
                check(env, location, values)
            },
        );
        self.validators.push(Box::new(Prebuilt(validator)));
        self
    }

    /// Builds the reader. `assemble` receives the values of every property.
    pub fn build<T, F>(self, assemble: F) -> JsReader<EB, T>
    where
        T: 'static,
        F: Fn(PropertyValues) -> T + Send + Sync + 'static,
    {
        let engine = self.into_engine();
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            engine.read(env, location, source).map(&assemble)
        })
    }

    /// Builds the reader with a fallible assembly function.
    ///
    /// An `Err` from `assemble` becomes a failure at the struct's location.
    pub fn try_build<T, F>(self, assemble: F) -> JsReader<EB, T>
    where
        T: 'static,
        F: Fn(PropertyValues) -> Result<T, JsError> + Send + Sync + 'static,
    {
        let engine = self.into_engine();
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            engine
                .read(env, location, source)
                .flat_map(|location, values| match assemble(values) {
                    Ok(value) => JsResult::success(location, value),
                    Err(error) => JsResult::fail(location, error),
                })
        })
    }

    fn into_engine(self) -> StructEngine<EB> {
        let paths: Vec<PropertyPaths> = self.properties.iter().map(|p| p.paths().clone()).collect();
        let validators = self.validators.iter().map(|builder| builder.build(&paths)).collect();
        StructEngine {
            reader_id: self.reader_id,
            properties: self.properties,
            validators,
        }
    }
}

struct StructEngine<EB> {
    reader_id: usize,
    properties: Vec<Arc<dyn ErasedProperty<EB>>>,
    validators: Vec<Arc<dyn StructValidator<EB>>>,
}

impl<EB> StructEngine<EB>
where
    EB: InvalidTypeErrorBuilder,
{
    fn read(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<PropertyValues> {
        let fields = match source {
            JsValue::Struct(fields) => fields,
            other => {
                return JsResult::fail(
                    location.clone(),
                    env.error_builders().invalid_type_error(JsType::Object, other.js_type()),
                )
            }
        };

        let mut values = Vec::with_capacity(self.properties.len());
        let mut failures = FailureAccumulator::new();
        for property in &self.properties {
            match property.read_erased(env, location, source) {
                JsResult::Success { value, .. } => values.push(Some(value)),
                JsResult::Failure(failure) => {
                    failures.push(failure);
                    if env.fail_fast() {
                        trace!(%location, property = %property.paths(), "struct read stopped at first failure");
                        break;
                    }
                    values.push(None);
                }
            }
        }
        if let Some(failure) = failures.finish() {
            return JsResult::Failure(failure);
        }

        let values = PropertyValues {
            reader_id: self.reader_id,
            values,
        };

        let mut failures = FailureAccumulator::new();
        for validator in &self.validators {
            if let Validation::Failure(failure) = validator.validate(env, location, fields, &values) {
                debug!(%location, causes = failure.len(), "struct validator rejected value");
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
