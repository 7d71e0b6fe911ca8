//! Error-builder capabilities.
//!
//! Readers never hard-code the errors they raise for structural conditions;
//! they ask the environment's error-builder set `EB`. Each reader bounds `EB`
//! by the capabilities it uses, so a reader cannot be built against an
//! environment that lacks one.

use crate::value::JsType;

use super::JsError;

/// Builds the error for a value that is absent.
pub trait PathMissingErrorBuilder {
    fn path_missing_error(&self) -> JsError;
}

/// Builds the error for a value of the wrong type.
pub trait InvalidTypeErrorBuilder {
    fn invalid_type_error(&self, expected: JsType, actual: JsType) -> JsError;
}

/// Builds the error for literal text that cannot become the target type.
pub trait ValueCastErrorBuilder {
    fn value_cast_error(&self, value: &str, target: &'static str) -> JsError;
}

/// Builds the error for a struct key that no property declares.
pub trait AdditionalPropertiesErrorBuilder {
    fn additional_properties_error(&self) -> JsError;
}

/// Builds the error for an array element that no item reader covers.
pub trait AdditionalItemsErrorBuilder {
    fn additional_items_error(&self) -> JsError;
}

/// The standard error-builder set, producing the matching [`JsError`] variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultErrorBuilders;

impl PathMissingErrorBuilder for DefaultErrorBuilders {
    fn path_missing_error(&self) -> JsError {
        JsError::PathMissing
    }
}

impl InvalidTypeErrorBuilder for DefaultErrorBuilders {
    fn invalid_type_error(&self, expected: JsType, actual: JsType) -> JsError {
        JsError::InvalidType { expected, actual }
    }
}

impl ValueCastErrorBuilder for DefaultErrorBuilders {
    fn value_cast_error(&self, value: &str, target: &'static str) -> JsError {
        JsError::ValueCast {
            value: value.to_string(),
            target,
        }
    }
}

impl AdditionalPropertiesErrorBuilder for DefaultErrorBuilders {
    fn additional_properties_error(&self) -> JsError {
        JsError::AdditionalProperties
    }
}

impl AdditionalItemsErrorBuilder for DefaultErrorBuilders {
    fn additional_items_error(&self) -> JsError {
        JsError::AdditionalItems
    }
}
