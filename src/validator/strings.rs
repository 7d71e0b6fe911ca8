//! String validators.
//!
//! Lengths are counted in characters, not bytes.

use regex::Regex;

use super::{invalid, valid, JsValidator};
use crate::env::ReaderEnv;
use crate::error::JsError;
use crate::location::Location;

/// Requires at least `min` characters.
pub fn min_length<EB: 'static>(min: usize) -> JsValidator<EB, String> {
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, value: &String| {
        let actual = value.chars().count();
        if actual < min {
            invalid(location, JsError::MinLength { expected: min, actual })
        } else {
            valid()
        }
    })
}

/// Requires at most `max` characters.
pub fn max_length<EB: 'static>(max: usize) -> JsValidator<EB, String> {
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, value: &String| {
        let actual = value.chars().count();
        if actual > max {
            invalid(location, JsError::MaxLength { expected: max, actual })
        } else {
            valid()
        }
    })
}

/// Requires the string to match a regular expression.
///
/// Returns an error if the pattern does not compile.
///
/// # Example
///
/// ```rust
/// use assay::validator::strings;
/// use assay::{DefaultErrorBuilders, Location, ReaderEnv};
///
/// let sku = strings::pattern::<DefaultErrorBuilders>(r"^[A-Z]{3}-\d{4}$").unwrap();
/// let env = ReaderEnv::default();
/// assert!(sku.validate(&env, &Location::root(), &"ABC-1234".to_string()).is_success());
/// assert!(sku.validate(&env, &Location::root(), &"abc".to_string()).is_failure());
///
/// assert!(strings::pattern::<DefaultErrorBuilders>("[invalid").is_err());
/// ```
pub fn pattern<EB: 'static>(pattern: &str) -> Result<JsValidator<EB, String>, regex::Error> {
    let regex = Regex::new(pattern)?;
    let pattern = pattern.to_string();
    Ok(JsValidator::from_fn(
        move |_: &ReaderEnv<EB>, location: &Location, value: &String| {
            if regex.is_match(value) {
                valid()
            } else {
                invalid(
                    location,
                    JsError::Pattern {
                        pattern: pattern.clone(),
                        value: value.clone(),
                    },
                )
            }
        },
    ))
}

/// Rejects empty and whitespace-only strings.
pub fn is_not_blank<EB: 'static>() -> JsValidator<EB, String> {
    JsValidator::from_fn(|_: &ReaderEnv<EB>, location: &Location, value: &String| {
        if value.trim().is_empty() {
            invalid(location, JsError::IsBlank)
        } else {
            valid()
        }
    })
}
