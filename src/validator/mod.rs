//! Validators and their composition.
//!
//! A validator is a pure function of `(env, location, value)` returning
//! [`ValidationResult`]. Validators compose with [`JsValidator::and`]
//! (stop at the first invalid) and [`JsValidator::or`] (stop at the first
//! valid, otherwise report both failures).
//!
//! # Example
//!
//! ```rust
//! use assay::validator::{self, strings};
//! use assay::{DefaultErrorBuilders, Location, ReaderEnv};
//!
//! let name = strings::is_not_blank::<DefaultErrorBuilders>()
//!     .and(strings::max_length(20));
//!
//! let env = ReaderEnv::default();
//! assert!(name.validate(&env, &Location::root(), &"alice".to_string()).is_success());
//! assert!(name.validate(&env, &Location::root(), &"  ".to_string()).is_failure());
//! # let _ = validator::valid();
//! ```

pub mod arrays;
pub mod numbers;
pub mod strings;
pub mod structs;

use std::fmt;
use std::sync::Arc;

use stillwater::prelude::*;
use stillwater::Validation;
use tracing::trace;

use crate::env::ReaderEnv;
use crate::error::{Failure, JsError};
use crate::location::Location;

/// Result of a validator: `Success(())` or the failure found.
pub type ValidationResult = Validation<(), Failure>;

/// Returns the valid result.
pub fn valid() -> ValidationResult {
    Validation::Success(())
}

/// Returns an invalid result with one error at `location`.
pub fn invalid(location: &Location, error: JsError) -> ValidationResult {
    Validation::Failure(Failure::new(location.clone(), error))
}

/// Checks a value read at some location.
///
/// Implemented for every `Fn(&ReaderEnv<EB>, &Location, &T) -> ValidationResult`
/// closure that is `Send + Sync`.
pub trait Validator<EB, T>: Send + Sync {
    /// Validates `value`, which was read at `location`.
    fn validate(&self, env: &ReaderEnv<EB>, location: &Location, value: &T) -> ValidationResult;
}

impl<EB, T, F> Validator<EB, T> for F
where
    F: Fn(&ReaderEnv<EB>, &Location, &T) -> ValidationResult + Send + Sync,
{
    fn validate(&self, env: &ReaderEnv<EB>, location: &Location, value: &T) -> ValidationResult {
        self(env, location, value)
    }
}

/// A shared, composable validator.
pub struct JsValidator<EB, T> {
    inner: Arc<dyn Validator<EB, T>>,
}

impl<EB, T> Clone for JsValidator<EB, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<EB, T> fmt::Debug for JsValidator<EB, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsValidator").finish_non_exhaustive()
    }
}

impl<EB: 'static, T: 'static> JsValidator<EB, T> {
    /// Wraps a validator implementation.
    pub fn new(validator: impl Validator<EB, T> + 'static) -> Self {
        Self {
            inner: Arc::new(validator),
        }
    }

    /// Wraps a validator closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&ReaderEnv<EB>, &Location, &T) -> ValidationResult + Send + Sync + 'static,
    {
        Self::new(f)
    }

    /// Validates `value`, which was read at `location`.
    pub fn validate(&self, env: &ReaderEnv<EB>, location: &Location, value: &T) -> ValidationResult {
        self.inner.validate(env, location, value)
    }

    /// Runs `self`, then `other` only if `self` was valid.
    pub fn and(self, other: JsValidator<EB, T>) -> Self {
        Self::from_fn(move |env: &ReaderEnv<EB>, location: &Location, value: &T| {
            match self.validate(env, location, value) {
                Validation::Success(()) => other.validate(env, location, value),
                failure => {
                    trace!(%location, "and: left validator rejected, skipping right");
                    failure
                }
            }
        })
    }

    /// Runs `self`, then `other` only if `self` was invalid.
    ///
    /// If both are invalid the result holds the failure of `self` followed by
    /// the failure of `other`.
    pub fn or(self, other: JsValidator<EB, T>) -> Self {
        Self::from_fn(move |env: &ReaderEnv<EB>, location: &Location, value: &T| {
            match self.validate(env, location, value) {
                Validation::Success(()) => valid(),
                Validation::Failure(left) => match other.validate(env, location, value) {
                    Validation::Success(()) => valid(),
                    Validation::Failure(right) => Validation::Failure(left.combine(right)),
                },
            }
        })
    }
}
