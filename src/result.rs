//! The result of a read.
//!
//! [`JsResult`] is either a located value or a [`Failure`]. It is a closed
//! sum type, so a result can never hold a value and errors at once.

use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{Failure, JsError};
use crate::location::Location;

/// The outcome of reading a value.
///
/// # Example
///
/// ```rust
/// use assay::{JsError, JsResult, Location};
///
/// let ok: JsResult<i32> = JsResult::success(Location::root(), 20);
/// assert_eq!(ok.map(|v| v * 2).ok(), Some(40));
///
/// let failed: JsResult<i32> = JsResult::fail(Location::root(), JsError::PathMissing);
/// assert_eq!(failed.get_or_else(|_| 0), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum JsResult<T> {
    /// The value was read.
    Success {
        /// Where the value was read from.
        location: Location,
        /// The value.
        value: T,
    },
    /// The value could not be read.
    Failure(Failure),
}

impl<T> JsResult<T> {
    /// Creates a successful result.
    pub fn success(location: Location, value: T) -> Self {
        JsResult::Success { location, value }
    }

    /// Creates a failed result with one error at `location`.
    pub fn fail(location: Location, error: JsError) -> Self {
        JsResult::Failure(Failure::new(location, error))
    }

    /// Returns true if the value was read.
    pub fn is_success(&self) -> bool {
        matches!(self, JsResult::Success { .. })
    }

    /// Returns true if the read failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, JsResult::Failure(_))
    }

    /// Transforms the value, passing failures through.
    pub fn map<R>(self, f: impl FnOnce(T) -> R) -> JsResult<R> {
        match self {
            JsResult::Success { location, value } => JsResult::Success {
                location,
                value: f(value),
            },
            JsResult::Failure(failure) => JsResult::Failure(failure),
        }
    }

    /// Chains another read on the value, passing failures through.
    pub fn flat_map<R>(self, f: impl FnOnce(Location, T) -> JsResult<R>) -> JsResult<R> {
        match self {
            JsResult::Success { location, value } => f(location, value),
            JsResult::Failure(failure) => JsResult::Failure(failure),
        }
    }

    /// Returns the value, or computes one from the failure.
    pub fn get_or_else(self, default: impl FnOnce(&Failure) -> T) -> T {
        match self {
            JsResult::Success { value, .. } => value,
            JsResult::Failure(failure) => default(&failure),
        }
    }

    /// Returns self on success, or the alternative result on failure.
    pub fn or_else(self, alternative: impl FnOnce(Failure) -> JsResult<T>) -> JsResult<T> {
        match self {
            success @ JsResult::Success { .. } => success,
            JsResult::Failure(failure) => alternative(failure),
        }
    }

    /// Returns the value, discarding the failure.
    pub fn ok(self) -> Option<T> {
        match self {
            JsResult::Success { value, .. } => Some(value),
            JsResult::Failure(_) => None,
        }
    }

    /// Returns a reference to the value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            JsResult::Success { value, .. } => Some(value),
            JsResult::Failure(_) => None,
        }
    }

    /// Returns a reference to the failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            JsResult::Success { .. } => None,
            JsResult::Failure(failure) => Some(failure),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            JsResult::Success { value, .. } => Ok(value),
            JsResult::Failure(failure) => Err(failure),
        }
    }

    /// Converts into a stillwater `Validation`.
    pub fn into_validation(self) -> Validation<T, Failure> {
        match self {
            JsResult::Success { value, .. } => Validation::Success(value),
            JsResult::Failure(failure) => Validation::Failure(failure),
        }
    }
}

/// A per-call accumulator for failures.
///
/// Engines create one per read and push every failure into it; in accumulate
/// mode the failures are merged in order, in fail-fast mode the caller stops
/// after the first push.
#[derive(Debug, Default)]
pub(crate) struct FailureAccumulator {
    failure: Option<Failure>,
}

impl FailureAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, failure: Failure) {
        self.failure = Some(match self.failure.take() {
            Some(existing) => existing.combine(failure),
            None => failure,
        });
    }

    pub(crate) fn finish(self) -> Option<Failure> {
        self.failure
    }
}
