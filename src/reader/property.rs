//! Property readers.
//!
//! A property reader turns the [`LookupResult`] of a property's paths into a
//! [`JsResult`]. The six variants differ only in how they treat `null` and a
//! missing path:
//!
//! | Variant                 | value       | `null`       | missing      |
//! |-------------------------|-------------|--------------|--------------|
//! | `required`              | read        | read         | PathMissing  |
//! | `optional`              | read        | read         | `None`       |
//! | `nullable`              | read        | `None`       | PathMissing  |
//! | `nullable_with_default` | read        | default      | default      |
//! | `defaultable`           | read        | default      | default      |
//! | `optional_with_default` | read        | default      | default      |
//!
//! A type mismatch along the path is always a failure; it is never treated
//! as a missing value. Defaults are computed only on the branches that use
//! them.

use std::fmt;
use std::sync::Arc;

use super::JsReader;
use crate::env::ReaderEnv;
use crate::error::{InvalidTypeErrorBuilder, PathMissingErrorBuilder};
use crate::location::Location;
use crate::lookup::{LookupResult, Undefined};
use crate::path::PropertyPaths;
use crate::result::JsResult;
use crate::value::{JsType, JsValue};

/// Supplies a default value for a property.
pub type DefaultFn<EB, T> = Arc<dyn Fn(&ReaderEnv<EB>) -> T + Send + Sync>;

/// Reads a property from the result of looking up its paths.
pub trait PropertyReader<EB, O>: Send + Sync {
    /// Reads the property from `lookup`.
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<O>;
}

fn type_mismatch<EB: InvalidTypeErrorBuilder, O>(
    env: &ReaderEnv<EB>,
    location: Location,
    expected: JsType,
    actual: JsType,
) -> JsResult<O> {
    JsResult::fail(location, env.error_builders().invalid_type_error(expected, actual))
}

/// A property that must be present. `null` is handed to the reader.
pub struct Required<EB, T> {
    reader: JsReader<EB, T>,
}

impl<EB, T> PropertyReader<EB, T> for Required<EB, T>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<T> {
        match lookup {
            LookupResult::Defined { location, value } => self.reader.read(env, &location, value),
            LookupResult::Undefined(Undefined::PathMissing { location }) => {
                JsResult::fail(location, env.error_builders().path_missing_error())
            }
            LookupResult::Undefined(Undefined::InvalidType {
                location,
                expected,
                actual,
            }) => type_mismatch(env, location, expected, actual),
        }
    }
}

/// A property that may be absent. `null` is handed to the reader.
pub struct Optional<EB, T> {
    reader: JsReader<EB, T>,
}

impl<EB, T> PropertyReader<EB, Option<T>> for Optional<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<Option<T>> {
        match lookup {
            LookupResult::Defined { location, value } => self.reader.read(env, &location, value).map(Some),
            LookupResult::Undefined(Undefined::PathMissing { location }) => JsResult::success(location, None),
            LookupResult::Undefined(Undefined::InvalidType {
                location,
                expected,
                actual,
            }) => type_mismatch(env, location, expected, actual),
        }
    }
}

/// A property that must be present but may be `null`.
pub struct Nullable<EB, T> {
    reader: JsReader<EB, T>,
}

impl<EB, T> PropertyReader<EB, Option<T>> for Nullable<EB, T>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<Option<T>> {
        match lookup {
            LookupResult::Defined {
                location,
                value: JsValue::Null,
            } => JsResult::success(location, None),
            LookupResult::Defined { location, value } => self.reader.read(env, &location, value).map(Some),
            LookupResult::Undefined(Undefined::PathMissing { location }) => {
                JsResult::fail(location, env.error_builders().path_missing_error())
            }
            LookupResult::Undefined(Undefined::InvalidType {
                location,
                expected,
                actual,
            }) => type_mismatch(env, location, expected, actual),
        }
    }
}

/// Shared behaviour of the variants with a default: `null` and a missing
/// path both yield the default.
fn read_or_default<EB, T>(
    env: &ReaderEnv<EB>,
    lookup: LookupResult<'_>,
    reader: &JsReader<EB, T>,
    default: &DefaultFn<EB, T>,
) -> JsResult<T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    match lookup {
        LookupResult::Defined {
            location,
            value: JsValue::Null,
        } => JsResult::success(location, default(env)),
        LookupResult::Defined { location, value } => reader.read(env, &location, value),
        LookupResult::Undefined(Undefined::PathMissing { location }) => JsResult::success(location, default(env)),
        LookupResult::Undefined(Undefined::InvalidType {
            location,
            expected,
            actual,
        }) => type_mismatch(env, location, expected, actual),
    }
}

/// A property with a default for `null` and missing values.
pub struct Defaultable<EB, T> {
    reader: JsReader<EB, T>,
    default: DefaultFn<EB, T>,
}

impl<EB, T> PropertyReader<EB, T> for Defaultable<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<T> {
        read_or_default(env, lookup, &self.reader, &self.default)
    }
}

/// An optional property with a default for `null` and missing values.
pub struct OptionalWithDefault<EB, T> {
    reader: JsReader<EB, T>,
    default: DefaultFn<EB, T>,
}

impl<EB, T> PropertyReader<EB, T> for OptionalWithDefault<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<T> {
        read_or_default(env, lookup, &self.reader, &self.default)
    }
}

/// A nullable property with a default for `null` and missing values.
pub struct NullableWithDefault<EB, T> {
    reader: JsReader<EB, T>,
    default: DefaultFn<EB, T>,
}

impl<EB, T> PropertyReader<EB, T> for NullableWithDefault<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    fn read(&self, env: &ReaderEnv<EB>, lookup: LookupResult<'_>) -> JsResult<T> {
        read_or_default(env, lookup, &self.reader, &self.default)
    }
}

/// A declared struct property: where to find it and how to read it.
///
/// Properties are immutable and can be shared by any number of readers.
pub struct StructProperty<EB, O> {
    paths: PropertyPaths,
    reader: Arc<dyn PropertyReader<EB, O>>,
}

impl<EB, O> Clone for StructProperty<EB, O> {
    fn clone(&self) -> Self {
        Self {
            paths: self.paths.clone(),
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<EB, O> fmt::Debug for StructProperty<EB, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructProperty")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl<EB, O> StructProperty<EB, O> {
    /// Creates a property from paths and any property reader.
    pub fn new(paths: impl Into<PropertyPaths>, reader: impl PropertyReader<EB, O> + 'static) -> Self {
        Self {
            paths: paths.into(),
            reader: Arc::new(reader),
        }
    }

    /// Returns the paths this property is read from.
    pub fn paths(&self) -> &PropertyPaths {
        &self.paths
    }

    /// Looks up the property in `source`, which sits at `location`, and reads it.
    pub fn read(&self, env: &ReaderEnv<EB>, location: &Location, source: &JsValue) -> JsResult<O> {
        self.reader.read(env, self.paths.lookup(location, source))
    }
}

fn default_fn<EB, T>(default: impl Fn(&ReaderEnv<EB>) -> T + Send + Sync + 'static) -> DefaultFn<EB, T> {
    Arc::new(default)
}

/// A property that must be present.
///
/// # Example
///
/// ```rust
/// use assay::reader::property;
/// use assay::{readers, DefaultErrorBuilders, JsValue, Location, ReaderEnv};
///
/// let id = property::required::<DefaultErrorBuilders, _>("id", readers::string());
/// let env = ReaderEnv::default();
///
/// let found = id.read(&env, &Location::root(), &JsValue::parse(r#"{"id": "a1"}"#).unwrap());
/// assert_eq!(found.ok(), Some("a1".to_string()));
///
/// let missing = id.read(&env, &Location::root(), &JsValue::parse("{}").unwrap());
/// assert_eq!(missing.into_result().unwrap_err().first().location.to_string(), "#/id");
/// ```
pub fn required<EB, T>(paths: impl Into<PropertyPaths>, reader: JsReader<EB, T>) -> StructProperty<EB, T>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    StructProperty::new(paths, Required { reader })
}

/// A property that may be absent; absence reads as `None`.
pub fn optional<EB, T>(paths: impl Into<PropertyPaths>, reader: JsReader<EB, T>) -> StructProperty<EB, Option<T>>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    StructProperty::new(paths, Optional { reader })
}

/// A property that must be present; `null` reads as `None`.
pub fn nullable<EB, T>(paths: impl Into<PropertyPaths>, reader: JsReader<EB, T>) -> StructProperty<EB, Option<T>>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    StructProperty::new(paths, Nullable { reader })
}

/// A property where `null` and absence read as `default(env)`.
pub fn defaultable<EB, T>(
    paths: impl Into<PropertyPaths>,
    reader: JsReader<EB, T>,
    default: impl Fn(&ReaderEnv<EB>) -> T + Send + Sync + 'static,
) -> StructProperty<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    StructProperty::new(
        paths,
        Defaultable {
            reader,
            default: default_fn(default),
        },
    )
}

/// An optional property where `null` and absence read as `default(env)`.
pub fn optional_with_default<EB, T>(
    paths: impl Into<PropertyPaths>,
    reader: JsReader<EB, T>,
    default: impl Fn(&ReaderEnv<EB>) -> T + Send + Sync + 'static,
) -> StructProperty<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    StructProperty::new(
        paths,
        OptionalWithDefault {
            reader,
            default: default_fn(default),
        },
    )
}

/// A nullable property where `null` and absence read as `default(env)`.
pub fn nullable_with_default<EB, T>(
    paths: impl Into<PropertyPaths>,
    reader: JsReader<EB, T>,
    default: impl Fn(&ReaderEnv<EB>) -> T + Send + Sync + 'static,
) -> StructProperty<EB, T>
where
    EB: InvalidTypeErrorBuilder + 'static,
    T: 'static,
{
    StructProperty::new(
        paths,
        NullableWithDefault {
            reader,
            default: default_fn(default),
        },
    )
}
