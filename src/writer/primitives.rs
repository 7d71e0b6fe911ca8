//! Leaf writers and the writer shortcuts.

use rust_decimal::Decimal;

use super::arrays::ArrayWriterBuilder;
use super::structs::StructWriterBuilder;
use super::{JsWriter, WriterEnv};
use crate::value::{JsNumber, JsValue};

/// Writes a string.
pub fn string() -> JsWriter<String> {
    JsWriter::from_fn(|_: &WriterEnv, value: &String| Some(JsValue::String(value.clone())))
}

/// Writes a boolean.
pub fn boolean() -> JsWriter<bool> {
    JsWriter::from_fn(|_: &WriterEnv, value: &bool| Some(JsValue::Boolean(*value)))
}

/// Writes a 32-bit integer.
pub fn int() -> JsWriter<i32> {
    JsWriter::from_fn(|_: &WriterEnv, value: &i32| Some(JsValue::Number(JsNumber::from(*value))))
}

/// Writes a 64-bit integer.
pub fn long() -> JsWriter<i64> {
    JsWriter::from_fn(|_: &WriterEnv, value: &i64| Some(JsValue::Number(JsNumber::from(*value))))
}

/// Writes an exact decimal, keeping its scale.
pub fn decimal() -> JsWriter<Decimal> {
    JsWriter::from_fn(|_: &WriterEnv, value: &Decimal| Some(JsValue::Number(JsNumber::from(*value))))
}

/// Writes a raw numeric literal.
pub fn number() -> JsWriter<JsNumber> {
    JsWriter::from_fn(|_: &WriterEnv, value: &JsNumber| Some(JsValue::Number(value.clone())))
}

/// Writes `Some` with `writer` and `None` as nothing, so the field is omitted.
pub fn optional<T: 'static>(writer: JsWriter<T>) -> JsWriter<Option<T>> {
    JsWriter::from_fn(move |env: &WriterEnv, value: &Option<T>| {
        value.as_ref().and_then(|v| writer.write(env, v))
    })
}

/// Writes `Some` with `writer` and `None` as `null`.
pub fn nullable<T: 'static>(writer: JsWriter<T>) -> JsWriter<Option<T>> {
    JsWriter::from_fn(move |env: &WriterEnv, value: &Option<T>| match value {
        Some(v) => writer.write(env, v),
        None => Some(JsValue::Null),
    })
}

/// Writes every element with `items`.
///
/// Shorthand for `ArrayWriterBuilder::new(items).build()`.
pub fn array<T: 'static>(items: JsWriter<T>) -> JsWriter<Vec<T>> {
    ArrayWriterBuilder::new(items).build()
}

/// Starts a struct writer.
///
/// Shorthand for `StructWriterBuilder::new()`.
pub fn structure<T: 'static>() -> StructWriterBuilder<T> {
    StructWriterBuilder::new()
}
