//! Leaf readers for primitive values.
//!
//! Numbers are stored as literal text, so the numeric readers parse that
//! text into the target type. Text that is a valid JSON number but does not
//! fit the target (a fraction for `int`, an overflow for `long`) is a
//! `ValueCast` error rather than a type mismatch.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::arrays::ArrayReaderBuilder;
use super::structs::StructReaderBuilder;
use super::JsReader;
use crate::env::ReaderEnv;
use crate::error::{AdditionalItemsErrorBuilder, InvalidTypeErrorBuilder, ValueCastErrorBuilder};
use crate::location::Location;
use crate::result::JsResult;
use crate::value::{JsNumber, JsType, JsValue};

fn invalid_type<EB, T>(env: &ReaderEnv<EB>, location: &Location, expected: JsType, source: &JsValue) -> JsResult<T>
where
    EB: InvalidTypeErrorBuilder,
{
    JsResult::fail(
        location.clone(),
        env.error_builders().invalid_type_error(expected, source.js_type()),
    )
}

/// Reads a string.
pub fn string<EB>() -> JsReader<EB, String>
where
    EB: InvalidTypeErrorBuilder + 'static,
{
    JsReader::from_fn(|env: &ReaderEnv<EB>, location: &Location, source: &JsValue| match source {
        JsValue::String(value) => JsResult::success(location.clone(), value.clone()),
        other => invalid_type(env, location, JsType::String, other),
    })
}

/// Reads a boolean.
pub fn boolean<EB>() -> JsReader<EB, bool>
where
    EB: InvalidTypeErrorBuilder + 'static,
{
    JsReader::from_fn(|env: &ReaderEnv<EB>, location: &Location, source: &JsValue| match source {
        JsValue::Boolean(value) => JsResult::success(location.clone(), *value),
        other => invalid_type(env, location, JsType::Boolean, other),
    })
}

/// Reads the raw numeric literal without converting it.
pub fn number<EB>() -> JsReader<EB, JsNumber>
where
    EB: InvalidTypeErrorBuilder + 'static,
{
    JsReader::from_fn(|env: &ReaderEnv<EB>, location: &Location, source: &JsValue| match source {
        JsValue::Number(value) => JsResult::success(location.clone(), value.clone()),
        other => invalid_type(env, location, JsType::Number, other),
    })
}

fn parsed<EB, T>(target: &'static str, parse: fn(&str) -> Option<T>) -> JsReader<EB, T>
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder + 'static,
    T: 'static,
{
    JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| match source {
        JsValue::Number(number) => match parse(number.as_str()) {
            Some(value) => JsResult::success(location.clone(), value),
            None => JsResult::fail(
                location.clone(),
                env.error_builders().value_cast_error(number.as_str(), target),
            ),
        },
        other => invalid_type(env, location, JsType::Number, other),
    })
}

/// Reads a 32-bit integer.
pub fn int<EB>() -> JsReader<EB, i32>
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder + 'static,
{
    parsed("int", |text| text.parse().ok())
}

/// Reads a 64-bit integer.
pub fn long<EB>() -> JsReader<EB, i64>
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder + 'static,
{
    parsed("long", |text| text.parse().ok())
}

/// Reads an exact decimal. Exponent notation is accepted.
pub fn decimal<EB>() -> JsReader<EB, Decimal>
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder + 'static,
{
    parsed("decimal", |text| {
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    })
}

/// Reads an array whose elements all use `items`.
///
/// Shorthand for `ArrayReaderBuilder::new().items(items).build()`.
pub fn array<EB, T>(items: JsReader<EB, T>) -> JsReader<EB, Vec<T>>
where
    EB: InvalidTypeErrorBuilder + AdditionalItemsErrorBuilder + 'static,
    T: 'static,
{
    ArrayReaderBuilder::new().items(items).build()
}

/// Starts a struct reader.
///
/// Shorthand for `StructReaderBuilder::new()`.
pub fn structure<EB>() -> StructReaderBuilder<EB>
where
    EB: InvalidTypeErrorBuilder + 'static,
{
    StructReaderBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DefaultErrorBuilders, JsError};

    type Env = ReaderEnv<DefaultErrorBuilders>;

    fn read<T: 'static>(reader: &JsReader<DefaultErrorBuilders, T>, json: &str) -> JsResult<T> {
        reader.read_root(&Env::default(), &JsValue::parse(json).unwrap())
    }

    fn first_error<T: 'static>(result: JsResult<T>) -> JsError {
        result.into_result().err().map(|f| f.first().error().clone()).unwrap()
    }

    #[test]
    fn test_string_and_boolean() {
        assert_eq!(read(&string(), r#""hi""#).ok(), Some("hi".to_string()));
        assert_eq!(read(&boolean(), "false").ok(), Some(false));
        assert_eq!(
            first_error(read(&string(), "1")),
            JsError::InvalidType {
                expected: JsType::String,
                actual: JsType::Number
            }
        );
    }

    #[test]
    fn test_string_rejects_null() {
        assert_eq!(
            first_error(read(&string(), "null")),
            JsError::InvalidType {
                expected: JsType::String,
                actual: JsType::Null
            }
        );
    }

    #[test]
    fn test_int_value_cast() {
        assert_eq!(read(&int(), "-17").ok(), Some(-17));
        assert_eq!(
            first_error(read(&int(), "1.5")),
            JsError::ValueCast {
                value: "1.5".to_string(),
                target: "int"
            }
        );
        assert_eq!(first_error(read(&int(), "3000000000")).code(), "value_cast");
    }

    #[test]
    fn test_long_range() {
        assert_eq!(read(&long(), "3000000000").ok(), Some(3_000_000_000));
        assert_eq!(first_error(read(&long(), "1e3")).code(), "value_cast");
    }

    #[test]
    fn test_decimal_keeps_precision() {
        let value = read(&decimal(), "12.3400").ok().unwrap();
        assert_eq!(value.to_string(), "12.3400");
        assert_eq!(read(&decimal(), "1e2").ok(), Some(Decimal::from(100)));
        assert_eq!(first_error(read(&decimal(), r#""12""#)).code(), "invalid_type");
    }

    #[test]
    fn test_number_keeps_literal() {
        let value = read(&number(), "1.000").ok().unwrap();
        assert_eq!(value.as_str(), "1.000");
    }

    #[test]
    fn test_array_shortcut() {
        assert_eq!(read(&array(int()), "[1, 2]").ok(), Some(vec![1, 2]));
    }
}
