//! The JSON value model read and written by this crate.
//!
//! [`JsValue`] is an immutable tagged union. Numbers keep their literal text
//! ([`JsNumber`]) so no precision is lost before a reader decides the target
//! type, and structs ([`JsStruct`]) keep insertion order. Exponent markers
//! are the one normalization: `1E3` is stored as `1e+3`.
//!
//! Duplicate keys: the first occurrence fixes the key's position and the last
//! occurrence supplies its value.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// The type tag of a [`JsValue`], used in type mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsType {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any numeric literal
    Number,
    /// A string
    String,
    /// An ordered list of values
    Array,
    /// A key/value struct
    Object,
}

impl Display for JsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsType::Null => "null",
            JsType::Boolean => "boolean",
            JsType::Number => "number",
            JsType::String => "string",
            JsType::Array => "array",
            JsType::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// A numeric literal backed by its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsNumber(String);

impl JsNumber {
    /// Parses numeric literal text, returning None if it is not a valid JSON number.
    ///
    /// Digits are kept as written. The exponent marker is normalized to
    /// lowercase with an explicit sign (`1E3` becomes `1e+3`), the same form
    /// [`JsValue::parse`] produces, so equal literals compare equal however
    /// they were obtained.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assay::JsNumber;
    ///
    /// assert_eq!(JsNumber::parse("12.50").unwrap().as_str(), "12.50");
    /// assert_eq!(JsNumber::parse("1E3").unwrap().as_str(), "1e+3");
    /// assert!(JsNumber::parse("12,5").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim() != text {
            return None;
        }
        serde_json::from_str::<serde_json::Number>(text)
            .ok()
            .map(|number| JsNumber(number.to_string()))
    }

    /// Creates a number from a finite float. Returns None for NaN or infinity.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(JsNumber(value.to_string()))
        } else {
            None
        }
    }

    /// Returns the literal text of the number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsNumber {
                fn from(value: $ty) -> Self {
                    JsNumber(value.to_string())
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<Decimal> for JsNumber {
    fn from(value: Decimal) -> Self {
        JsNumber(value.to_string())
    }
}

impl Display for JsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered key/value struct.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the position of its first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsStruct(IndexMap<String, JsValue>);

impl JsStruct {
    /// Creates an empty struct.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: JsValue) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        self.0.get(key)
    }

    /// Returns true if the struct has the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, JsValue)> for JsStruct {
    fn from_iter<I: IntoIterator<Item = (K, JsValue)>>(iter: I) -> Self {
        let mut result = JsStruct::new();
        for (key, value) in iter {
            result.insert(key, value);
        }
        result
    }
}

/// A parsed JSON value.
///
/// # Example
///
/// ```rust
/// use assay::{JsType, JsValue};
///
/// let value = JsValue::parse(r#"{"id": "x", "tags": ["a", "b"]}"#).unwrap();
/// assert_eq!(value.js_type(), JsType::Object);
/// assert_eq!(value.as_struct().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsValue {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// A numeric literal
    Number(JsNumber),
    /// A string
    String(String),
    /// An ordered list of values
    Array(Vec<JsValue>),
    /// A key/value struct
    Struct(JsStruct),
}

impl JsValue {
    /// Creates a struct value from key/value pairs.
    pub fn structure<K: Into<String>>(entries: impl IntoIterator<Item = (K, JsValue)>) -> Self {
        JsValue::Struct(entries.into_iter().collect())
    }

    /// Creates an array value.
    pub fn array(items: impl IntoIterator<Item = JsValue>) -> Self {
        JsValue::Array(items.into_iter().collect())
    }

    /// Returns the type tag of this value.
    pub fn js_type(&self) -> JsType {
        match self {
            JsValue::Null => JsType::Null,
            JsValue::Boolean(_) => JsType::Boolean,
            JsValue::Number(_) => JsType::Number,
            JsValue::String(_) => JsType::String,
            JsValue::Array(_) => JsType::Array,
            JsValue::Struct(_) => JsType::Object,
        }
    }

    /// Returns true if this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    /// Returns the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items, if this is an array.
    pub fn as_array(&self) -> Option<&[JsValue]> {
        match self {
            JsValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the struct, if this is a struct.
    pub fn as_struct(&self) -> Option<&JsStruct> {
        match self {
            JsValue::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        JsValue::String(value.to_string())
    }
}

impl From<String> for JsValue {
    fn from(value: String) -> Self {
        JsValue::String(value)
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        JsValue::Boolean(value)
    }
}

impl From<i32> for JsValue {
    fn from(value: i32) -> Self {
        JsValue::Number(value.into())
    }
}

impl From<i64> for JsValue {
    fn from(value: i64) -> Self {
        JsValue::Number(value.into())
    }
}

impl From<JsNumber> for JsValue {
    fn from(value: JsNumber) -> Self {
        JsValue::Number(value)
    }
}

impl From<JsStruct> for JsValue {
    fn from(value: JsStruct) -> Self {
        JsValue::Struct(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags() {
        assert_eq!(JsValue::Null.js_type(), JsType::Null);
        assert_eq!(JsValue::from(true).js_type(), JsType::Boolean);
        assert_eq!(JsValue::from(1).js_type(), JsType::Number);
        assert_eq!(JsValue::from("a").js_type(), JsType::String);
        assert_eq!(JsValue::array([]).js_type(), JsType::Array);
        assert_eq!(JsValue::Struct(JsStruct::new()).js_type(), JsType::Object);
    }

    #[test]
    fn test_number_keeps_literal_text() {
        let number = JsNumber::parse("1.2300").unwrap();
        assert_eq!(number.as_str(), "1.2300");
    }

    #[test]
    fn test_number_rejects_invalid_text() {
        assert!(JsNumber::parse("abc").is_none());
        assert!(JsNumber::parse("").is_none());
        assert!(JsNumber::parse("1.").is_none());
    }

    #[test]
    fn test_number_from_non_finite_float() {
        assert!(JsNumber::from_f64(f64::NAN).is_none());
        assert!(JsNumber::from_f64(f64::INFINITY).is_none());
        assert_eq!(JsNumber::from_f64(0.5).unwrap().as_str(), "0.5");
    }

    #[test]
    fn test_struct_preserves_insertion_order() {
        let value = JsStruct::from_iter([
            ("z", JsValue::from(1)),
            ("a", JsValue::from(2)),
            ("m", JsValue::from(3)),
        ]);
        let keys: Vec<_> = value.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_struct_duplicate_key_overwrites_in_place() {
        let value = JsStruct::from_iter([
            ("a", JsValue::from(1)),
            ("b", JsValue::from(2)),
            ("a", JsValue::from(3)),
        ]);
        let keys: Vec<_> = value.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(value.get("a"), Some(&JsValue::from(3)));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(JsValue::from("x").as_str(), Some("x"));
        assert!(JsValue::from(1).as_str().is_none());
        assert!(JsValue::Null.is_null());
        assert_eq!(JsValue::array([JsValue::Null]).as_array().map(|a| a.len()), Some(1));
    }
}
