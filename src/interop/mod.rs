//! Interoperability with `serde_json`.
//!
//! This module converts between [`JsValue`](crate::JsValue) and
//! `serde_json::Value`, and parses and prints JSON text. Parsing happens
//! before any reader runs, so malformed text is a [`ParseError`](crate::ParseError)
//! rather than a read failure.

pub mod json;
