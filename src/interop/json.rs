//! Conversion between [`JsValue`] and `serde_json::Value`.
//!
//! Numbers cross the boundary as literal text (`arbitrary_precision`), with
//! exponent markers normalized to `e+`/`e-`, and object keys keep their
//! order (`preserve_order`). A duplicate key keeps
//! the position of its first occurrence and the value of its last.

use serde_json::{Map, Number, Value};

use crate::error::ParseError;
use crate::value::{JsNumber, JsStruct, JsValue};

impl JsValue {
    /// Parses JSON text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assay::JsValue;
    ///
    /// let value = JsValue::parse(r#"{"price": 12.50}"#).unwrap();
    /// assert_eq!(value.to_json_string(), r#"{"price":12.50}"#);
    ///
    /// assert!(JsValue::parse("{").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<JsValue, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(JsValue::from(value))
    }

    /// Prints this value as compact JSON text.
    pub fn to_json_string(&self) -> String {
        Value::from(self).to_string()
    }
}

impl From<Value> for JsValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsValue::Null,
            Value::Bool(b) => JsValue::Boolean(b),
            Value::Number(n) => match JsNumber::parse(&n.to_string()) {
                Some(number) => JsValue::Number(number),
                None => JsValue::Null,
            },
            Value::String(s) => JsValue::String(s),
            Value::Array(items) => JsValue::Array(items.into_iter().map(JsValue::from).collect()),
            Value::Object(fields) => JsValue::Struct(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, JsValue::from(value)))
                    .collect::<JsStruct>(),
            ),
        }
    }
}

impl From<&JsValue> for Value {
    fn from(value: &JsValue) -> Self {
        match value {
            JsValue::Null => Value::Null,
            JsValue::Boolean(b) => Value::Bool(*b),
            JsValue::Number(n) => serde_json::from_str::<Number>(n.as_str())
                .map(Value::Number)
                .unwrap_or(Value::Null),
            JsValue::String(s) => Value::String(s.clone()),
            JsValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            JsValue::Struct(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.to_string(), Value::from(value)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<JsValue> for Value {
    fn from(value: JsValue) -> Self {
        Value::from(&value)
    }
}
