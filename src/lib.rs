//! # Assay
//!
//! Typed readers and writers for JSON documents that report every problem
//! in a document, each tagged with its exact location.
//!
//! ## Overview
//!
//! A reader turns a parsed [`JsValue`] into a domain value. Reads never
//! throw: they return a [`JsResult`], which is either the value or a
//! [`Failure`] listing one [`Cause`] per location that went wrong. By
//! default every error in the document is collected in one pass; with
//! fail-fast enabled the first error is returned instead.
//!
//! Writers do the reverse, turning domain values back into [`JsValue`]s.
//!
//! ## Core Types
//!
//! - [`Location`]: a position in a document (e.g., `#/user/phones[0]`)
//! - [`JsReader`]: a composable reader, built from [`readers`] and the
//!   struct and array engines
//! - [`JsValidator`]: a composable check combined with `and` / `or`
//! - [`JsWriter`]: a composable writer, built from [`writers`]
//! - [`ReaderEnv`]: error builders and options threaded through a read
//!
//! ## Example
//!
//! ```rust
//! use assay::reader::property;
//! use assay::validator::strings;
//! use assay::{readers, DefaultErrorBuilders, JsValue, ReaderEnv, StructReaderBuilder};
//!
//! #[derive(Debug)]
//! struct Signup {
//!     email: String,
//!     name: String,
//! }
//!
//! let mut builder = StructReaderBuilder::<DefaultErrorBuilders>::new();
//! let email = builder.property(property::required("email", readers::string()));
//! let name = builder.property(property::required(
//!     "name",
//!     readers::string().validation(strings::is_not_blank()),
//! ));
//! let reader = builder.build(move |mut values| Signup {
//!     email: values.take(email),
//!     name: values.take(name),
//! });
//!
//! // Both problems are reported, in declaration order
//! let source = JsValue::parse(r#"{"name": "  "}"#).unwrap();
//! let failure = reader
//!     .read_root(&ReaderEnv::default(), &source)
//!     .into_result()
//!     .unwrap_err();
//!
//! assert_eq!(failure.len(), 2);
//! assert_eq!(failure.first().location.to_string(), "#/email");
//! ```

pub mod env;
pub mod error;
pub mod interop;
pub mod location;
pub mod lookup;
pub mod path;
pub mod reader;
pub mod result;
pub mod validator;
pub mod value;
pub mod writer;

pub use env::{ReaderEnv, ReaderOptions};
pub use error::{
    AdditionalItemsErrorBuilder, AdditionalPropertiesErrorBuilder, Cause, DefaultErrorBuilders,
    Failure, InvalidTypeErrorBuilder, JsError, ParseError, PathMissingErrorBuilder,
    ReferenceError, ValueCastErrorBuilder,
};
pub use location::{Location, PathElement};
pub use lookup::{LookupResult, Undefined};
pub use path::{JsPath, PropertyPaths};
pub use reader::{
    ArrayReaderBuilder, JsReader, PropertyKey, PropertyValues, Reader, ReaderRef,
    StructProperty, StructReaderBuilder,
};
pub use result::JsResult;
pub use validator::{JsValidator, ValidationResult, Validator};
pub use value::{JsNumber, JsStruct, JsType, JsValue};
pub use writer::{
    ArrayWriterBuilder, EmptyResultAction, JsWriter, StructWriterBuilder, Writer, WriterEnv,
    WriterOptions,
};

/// Primitive readers and reader shortcuts.
pub use reader::primitives as readers;

/// Primitive writers and writer shortcuts.
pub use writer::primitives as writers;
