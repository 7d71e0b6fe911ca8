//! Error types for read failures.
//!
//! This module provides [`JsError`] tags, [`Cause`] (a location with its
//! errors), [`Failure`] (a non-empty list of causes) and the error-builder
//! capabilities a [`ReaderEnv`](crate::ReaderEnv) supplies.

mod builders;
mod js_error;

pub use builders::{
    AdditionalItemsErrorBuilder, AdditionalPropertiesErrorBuilder, DefaultErrorBuilders,
    InvalidTypeErrorBuilder, PathMissingErrorBuilder, ValueCastErrorBuilder,
};
pub use js_error::{Cause, Failure, JsError, ParseError, ReferenceError};
