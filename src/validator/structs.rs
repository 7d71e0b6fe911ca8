//! Struct-level validators.
//!
//! Struct validators run after every property of a struct reader has been
//! read. They see the raw source struct and the extracted property values.
//! Because some of them depend on the declared properties (for example the
//! additional-properties check), they are registered as
//! [`StructValidatorBuilder`]s and built once when the struct reader is built.

use std::collections::HashSet;
use std::sync::Arc;

use stillwater::prelude::*;
use stillwater::Validation;
use tracing::trace;

use super::{invalid, valid, ValidationResult};
use crate::env::ReaderEnv;
use crate::error::{AdditionalPropertiesErrorBuilder, Failure, JsError};
use crate::location::Location;
use crate::path::PropertyPaths;
use crate::reader::PropertyValues;
use crate::value::JsStruct;

/// Validates a struct after its properties were read.
///
/// Implemented for every
/// `Fn(&ReaderEnv<EB>, &Location, &JsStruct, &PropertyValues) -> ValidationResult`
/// closure that is `Send + Sync`.
pub trait StructValidator<EB>: Send + Sync {
    /// Validates `source`, which sits at `location`, given the values read from it.
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &JsStruct,
        values: &PropertyValues,
    ) -> ValidationResult;
}

impl<EB, F> StructValidator<EB> for F
where
    F: Fn(&ReaderEnv<EB>, &Location, &JsStruct, &PropertyValues) -> ValidationResult + Send + Sync,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &JsStruct,
        values: &PropertyValues,
    ) -> ValidationResult {
        self(env, location, source, values)
    }
}

/// Builds a [`StructValidator`] from the properties a struct reader declares.
pub trait StructValidatorBuilder<EB>: Send + Sync {
    /// Builds the validator. Called once per struct reader.
    fn build(&self, properties: &[PropertyPaths]) -> Arc<dyn StructValidator<EB>>;
}

/// Rejects keys that no declared property reads.
///
/// The declared set is the top-level key of every path of every property;
/// paths starting with an index are ignored. Each extra key is reported at
/// its own location. In fail-fast mode only the first extra key is reported.
pub fn additional_properties() -> AdditionalProperties {
    AdditionalProperties
}

/// See [`additional_properties`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditionalProperties;

impl<EB> StructValidatorBuilder<EB> for AdditionalProperties
where
    EB: AdditionalPropertiesErrorBuilder + 'static,
{
    fn build(&self, properties: &[PropertyPaths]) -> Arc<dyn StructValidator<EB>> {
        let declared: HashSet<String> = properties
            .iter()
            .flat_map(|paths| paths.head_keys())
            .map(str::to_string)
            .collect();
        Arc::new(AdditionalPropertiesValidator { declared })
    }
}

struct AdditionalPropertiesValidator {
    declared: HashSet<String>,
}

impl<EB> StructValidator<EB> for AdditionalPropertiesValidator
where
    EB: AdditionalPropertiesErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &JsStruct,
        _values: &PropertyValues,
    ) -> ValidationResult {
        let mut failure: Option<Failure> = None;
        for key in source.keys().filter(|key| !self.declared.contains(*key)) {
            let error = env.error_builders().additional_properties_error();
            let next = Failure::new(location.key(key), error);
            failure = Some(match failure {
                Some(existing) => existing.combine(next),
                None => next,
            });
            if env.fail_fast() {
                trace!(%location, key, "additional_properties: stopping at first extra key");
                break;
            }
        }
        match failure {
            Some(failure) => Validation::Failure(failure),
            None => valid(),
        }
    }
}

/// Requires the source struct to have at least `min` keys.
pub fn min_properties(min: usize) -> PropertyCount {
    PropertyCount {
        min: Some(min),
        max: None,
    }
}

/// Requires the source struct to have at most `max` keys.
pub fn max_properties(max: usize) -> PropertyCount {
    PropertyCount {
        min: None,
        max: Some(max),
    }
}

/// Bounds on the number of keys in the source struct.
#[derive(Debug, Clone, Copy)]
pub struct PropertyCount {
    min: Option<usize>,
    max: Option<usize>,
}

impl<EB: 'static> StructValidatorBuilder<EB> for PropertyCount {
    fn build(&self, _properties: &[PropertyPaths]) -> Arc<dyn StructValidator<EB>> {
        Arc::new(*self)
    }
}

impl<EB> StructValidator<EB> for PropertyCount {
    fn validate(
        &self,
        _env: &ReaderEnv<EB>,
        location: &Location,
        source: &JsStruct,
        _values: &PropertyValues,
    ) -> ValidationResult {
        let actual = source.len();
        if let Some(min) = self.min.filter(|min| actual < *min) {
            return invalid(location, JsError::MinProperties { expected: min, actual });
        }
        if let Some(max) = self.max.filter(|max| actual > *max) {
            return invalid(location, JsError::MaxProperties { expected: max, actual });
        }
        valid()
    }
}

/// Adapts a ready-made validator that does not depend on the declared properties.
pub(crate) struct Prebuilt<EB>(pub(crate) Arc<dyn StructValidator<EB>>);

impl<EB> StructValidatorBuilder<EB> for Prebuilt<EB> {
    fn build(&self, _properties: &[PropertyPaths]) -> Arc<dyn StructValidator<EB>> {
        Arc::clone(&self.0)
    }
}
