//! Readers: functions from a located value to a [`JsResult`].
//!
//! This module provides the [`Reader`] trait, the shared [`JsReader`] handle
//! with its combinators, and the engines built on top of them:
//!
//! - [`primitives`]: leaf readers for strings, booleans and numbers
//! - [`property`]: the six property variants used by struct readers
//! - [`structs`]: the struct reader engine
//! - [`arrays`]: the array reader engine
//! - [`reference`]: late-bound slots for recursive shapes
//!
//! # Example
//!
//! ```rust
//! use assay::{readers, DefaultErrorBuilders, JsValue, ReaderEnv};
//!
//! let age = readers::int::<DefaultErrorBuilders>().map(|years| years as u32);
//!
//! let env = ReaderEnv::default();
//! let result = age.read_root(&env, &JsValue::parse("42").unwrap());
//! assert_eq!(result.ok(), Some(42));
//! ```

pub mod arrays;
pub mod primitives;
pub mod property;
pub mod reference;
pub mod structs;

pub use arrays::ArrayReaderBuilder;
pub use property::{PropertyReader, StructProperty};
pub use reference::ReaderRef;
pub use structs::{PropertyKey, PropertyValues, StructReaderBuilder};

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::env::ReaderEnv;
use crate::location::Location;
use crate::result::JsResult;
use crate::validator::JsValidator;
use crate::value::JsValue;

/// Reads a value of type `T` from a located JSON value.
///
/// Implemented for every `Fn(&ReaderEnv<EB>, &Location, &JsValue) -> JsResult<T>`
/// closure that is `Send + Sync`.
pub trait Reader<EB, T>: Send + Sync {
    /// Reads `source`, which sits at `location`.
    fn read(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<T>;
}

impl<EB, T, F> Reader<EB, T> for F
where
    F: Fn(&ReaderEnv<EB>, &Location, &JsValue) -> JsResult<T> + Send + Sync,
{
    fn read(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<T> {
        self(env, location, source)
    }
}

/// A shared, composable reader.
///
/// Cloning is cheap and clones share the same underlying reader. Readers
/// hold no per-read state, so one reader can serve concurrent reads.
pub struct JsReader<EB, T> {
    inner: Arc<dyn Reader<EB, T>>,
}

impl<EB, T> Clone for JsReader<EB, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<EB, T> fmt::Debug for JsReader<EB, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsReader").finish_non_exhaustive()
    }
}

impl<EB: 'static, T: 'static> JsReader<EB, T> {
    /// Wraps a reader implementation.
    pub fn new(reader: impl Reader<EB, T> + 'static) -> Self {
        Self {
            inner: Arc::new(reader),
        }
    }

    /// Wraps a reader closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&ReaderEnv<EB>, &Location, &JsValue) -> JsResult<T> + Send + Sync + 'static,
    {
        Self::new(f)
    }

    /// Reads `source`, which sits at `location`.
    pub fn read(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<T> {
        self.inner.read(env, location, source)
    }

    /// Reads `source` as a whole document, at the root location.
    pub fn read_root(&self, env: &ReaderEnv<EB>, source: &JsValue) -> JsResult<T> {
        self.read(env, &Location::root(), source)
    }

    /// Reads a batch of independent documents in parallel.
    ///
    /// Each document is read at the root location. Results keep the order
    /// of `sources`.
    ///
    /// A single read is synchronous and never spawns threads. This helper is
    /// the exception: it runs the reads on rayon's global thread pool, at the
    /// caller's request. Call [`JsReader::read_root`] in a loop to stay on the
    /// calling thread.
    pub fn read_all(&self, env: &ReaderEnv<EB>, sources: &[JsValue]) -> Vec<JsResult<T>>
    where
        EB: Sync,
        T: Send,
    {
        sources
            .par_iter()
            .map(|source| self.read_root(env, source))
            .collect()
    }

    /// Transforms the value read.
    pub fn map<R: 'static>(self, f: impl Fn(T) -> R + Send + Sync + 'static) -> JsReader<EB, R> {
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            self.read(env, location, source).map(&f)
        })
    }

    /// Chains a fallible step on the value read. The step receives the
    /// location the value was read at.
    pub fn flat_map<R: 'static>(
        self,
        f: impl Fn(Location, T) -> JsResult<R> + Send + Sync + 'static,
    ) -> JsReader<EB, R> {
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            self.read(env, location, source).flat_map(&f)
        })
    }

    /// Validates the value read. An invalid value turns the read into the
    /// validator's failure.
    pub fn validation(self, validator: JsValidator<EB, T>) -> Self {
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            self.read(env, location, source).flat_map(|location, value| {
                match validator.validate(env, &location, &value) {
                    Validation::Success(()) => JsResult::success(location, value),
                    Validation::Failure(failure) => JsResult::Failure(failure),
                }
            })
        })
    }

    /// Tries `other` when this reader fails.
    ///
    /// If both fail the result holds the failure of `self` followed by the
    /// failure of `other`.
    pub fn or(self, other: JsReader<EB, T>) -> Self {
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            self.read(env, location, source)
                .or_else(|left| match other.read(env, location, source) {
                    JsResult::Failure(right) => JsResult::Failure(left.combine(right)),
                    success => success,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DefaultErrorBuilders, JsError};
    use crate::reader::primitives::{int, string};
    use crate::validator::numbers::minimum;

    type Env = ReaderEnv<DefaultErrorBuilders>;

    #[test]
    fn test_closure_reader() {
        let reader = JsReader::from_fn(|_: &Env, location: &Location, _: &JsValue| {
            JsResult::success(location.clone(), 7)
        });
        assert_eq!(reader.read_root(&Env::default(), &JsValue::Null).ok(), Some(7));
    }

    #[test]
    fn test_map_and_flat_map() {
        let env = Env::default();
        let doubled = int::<DefaultErrorBuilders>().map(|v| v * 2);
        assert_eq!(doubled.read_root(&env, &JsValue::from(4)).ok(), Some(8));

        let checked = int::<DefaultErrorBuilders>().flat_map(|location, v| {
            if v % 2 == 0 {
                JsResult::success(location, v)
            } else {
                JsResult::fail(location, JsError::custom("odd", "must be even"))
            }
        });
        let failure = checked.read_root(&env, &JsValue::from(3)).into_result().unwrap_err();
        assert_eq!(failure.first().error().code(), "odd");
    }

    #[test]
    fn test_validation_reports_at_read_location() {
        let env = Env::default();
        let adult = int::<DefaultErrorBuilders>().validation(minimum(18));
        let location = Location::root().key("age");
        let failure = adult
            .read(&env, &location, &JsValue::from(12))
            .into_result()
            .unwrap_err();
        assert_eq!(failure.first().location, location);
        assert_eq!(failure.first().error().code(), "minimum");
    }

    #[test]
    fn test_or_falls_back_and_merges() {
        let env = Env::default();
        let text_or_number = string::<DefaultErrorBuilders>().or(int().map(|n| n.to_string()));

        assert_eq!(text_or_number.read_root(&env, &JsValue::from(5)).ok(), Some("5".to_string()));

        let failure = text_or_number
            .read_root(&env, &JsValue::from(true))
            .into_result()
            .unwrap_err();
        assert_eq!(failure.len(), 2);
        assert!(failure.iter().all(|c| c.error().code() == "invalid_type"));
    }

    #[test]
    fn test_read_all_keeps_order() {
        let env = Env::default();
        let sources: Vec<JsValue> = (0..64).map(JsValue::from).collect();
        let results = int::<DefaultErrorBuilders>().read_all(&env, &sources);
        let values: Vec<_> = results.into_iter().map(|r| r.ok()).collect();
        let expected: Vec<_> = (0..64).map(Some).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_read_all_matches_sequential_reads() {
        let env = Env::default();
        let reader = int::<DefaultErrorBuilders>().validation(minimum(10));
        let sources: Vec<JsValue> = (0..32)
            .map(|i| if i % 3 == 0 { JsValue::from("x") } else { JsValue::from(i) })
            .collect();

        let sequential: Vec<_> = sources.iter().map(|s| reader.read_root(&env, s)).collect();
        assert_eq!(reader.read_all(&env, &sources), sequential);
    }
}
