//! Array validators, applied to the items an array reader produced.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use stillwater::Validation;
use tracing::trace;

use super::{invalid, valid, JsValidator};
use crate::env::ReaderEnv;
use crate::error::{Cause, Failure, JsError};
use crate::location::Location;

/// Requires at least `min` items.
pub fn min_items<EB: 'static, T: 'static>(min: usize) -> JsValidator<EB, Vec<T>> {
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, items: &Vec<T>| {
        if items.len() < min {
            invalid(
                location,
                JsError::MinItems {
                    expected: min,
                    actual: items.len(),
                },
            )
        } else {
            valid()
        }
    })
}

/// Requires at most `max` items.
pub fn max_items<EB: 'static, T: 'static>(max: usize) -> JsValidator<EB, Vec<T>> {
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, items: &Vec<T>| {
        if items.len() > max {
            invalid(
                location,
                JsError::MaxItems {
                    expected: max,
                    actual: items.len(),
                },
            )
        } else {
            valid()
        }
    })
}

/// Requires every item to have a distinct key.
///
/// The first occurrence of a key is never an error; each later occurrence is
/// reported at the array location with its index and key. In fail-fast mode
/// only the first duplicate is reported.
///
/// # Example
///
/// ```rust
/// use assay::validator::arrays;
/// use assay::{DefaultErrorBuilders, JsError, Location, ReaderEnv};
///
/// let unique = arrays::is_unique::<DefaultErrorBuilders, String, _, _>(|s: &String| s.clone());
/// let items = vec!["a".to_string(), "a".to_string(), "b".to_string()];
///
/// let failure = unique
///     .validate(&ReaderEnv::default(), &Location::root(), &items)
///     .into_result()
///     .unwrap_err();
/// assert_eq!(
///     failure.first().error(),
///     &JsError::NonUniqueItem { index: 1, value: "a".to_string() }
/// );
/// ```
pub fn is_unique<EB, T, K, F>(key_selector: F) -> JsValidator<EB, Vec<T>>
where
    EB: 'static,
    T: 'static,
    K: Eq + Hash + Display,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    JsValidator::from_fn(move |env: &ReaderEnv<EB>, location: &Location, items: &Vec<T>| {
        let duplicates = find_duplicates(items, &key_selector, env.fail_fast());
        let mut errors = duplicates.into_iter();
        match errors.next() {
            None => valid(),
            Some(first) => {
                let cause = errors.fold(Cause::new(location.clone(), first), Cause::with_error);
                Validation::Failure(Failure::from_cause(cause))
            }
        }
    })
}

/// Returns one error per item whose key was already seen, in index order.
fn find_duplicates<T, K, F>(items: &[T], key_selector: &F, fail_fast: bool) -> Vec<JsError>
where
    K: Eq + Hash + Display,
    F: Fn(&T) -> K,
{
    let mut seen: HashMap<K, usize> = HashMap::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let key = key_selector(item);
        if seen.contains_key(&key) {
            errors.push(JsError::NonUniqueItem {
                index,
                value: key.to_string(),
            });
            if fail_fast {
                trace!(index, "is_unique: stopping at first duplicate");
                break;
            }
        } else {
            seen.insert(key, index);
        }
    }
    errors
}
