//! Writers: the dual of readers, turning domain values into [`JsValue`]s.
//!
//! A writer may produce nothing, in which case the containing struct or
//! array writer omits the field or element. Container writers decide what an
//! empty result becomes through [`EmptyResultAction`].
//!
//! # Example
//!
//! ```rust
//! use assay::{writers, JsValue, StructWriterBuilder, WriterEnv};
//!
//! struct User {
//!     id: String,
//!     nickname: Option<String>,
//! }
//!
//! let writer = StructWriterBuilder::new()
//!     .property("id", |u: &User| &u.id, writers::string())
//!     .property("nickname", |u: &User| &u.nickname, writers::optional(writers::string()))
//!     .build();
//!
//! let user = User { id: "u1".to_string(), nickname: None };
//! let value = writer.write(&WriterEnv::default(), &user).unwrap();
//! assert_eq!(value.to_json_string(), r#"{"id":"u1"}"#);
//! # let _ = JsValue::Null;
//! ```

pub mod arrays;
pub mod primitives;
pub mod structs;

pub use arrays::ArrayWriterBuilder;
pub use structs::StructWriterBuilder;

use std::fmt;
use std::sync::Arc;

use crate::value::JsValue;

/// What a container writer returns when it has nothing to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyResultAction {
    /// Return the empty container (`{}` or `[]`).
    #[default]
    ReturnEmptyValue,
    /// Return `null`.
    ReturnNullValue,
    /// Return nothing, so the containing writer omits the value.
    ReturnNothing,
}

impl EmptyResultAction {
    /// Applies the action to an empty container value.
    pub fn apply(self, empty: JsValue) -> Option<JsValue> {
        match self {
            EmptyResultAction::ReturnEmptyValue => Some(empty),
            EmptyResultAction::ReturnNullValue => Some(JsValue::Null),
            EmptyResultAction::ReturnNothing => None,
        }
    }
}

/// Options for container writers that do not set their own empty action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterOptions {
    struct_empty: EmptyResultAction,
    array_empty: EmptyResultAction,
}

impl WriterOptions {
    /// Creates the default options (write empty containers as-is).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default action for empty structs.
    pub fn with_struct_empty(mut self, action: EmptyResultAction) -> Self {
        self.struct_empty = action;
        self
    }

    /// Sets the default action for empty arrays.
    pub fn with_array_empty(mut self, action: EmptyResultAction) -> Self {
        self.array_empty = action;
        self
    }

    /// Returns the default action for empty structs.
    pub fn struct_empty(&self) -> EmptyResultAction {
        self.struct_empty
    }

    /// Returns the default action for empty arrays.
    pub fn array_empty(&self) -> EmptyResultAction {
        self.array_empty
    }
}

/// The environment threaded through every write.
#[derive(Debug, Clone, Default)]
pub struct WriterEnv {
    options: WriterOptions,
}

impl WriterEnv {
    /// Creates an environment with the given options.
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }
}

/// Writes a value of type `T`.
///
/// Writers do not track locations: writing cannot fail, so there is no
/// error to tag with a position, and a writer produces the same output
/// wherever in the document its result ends up.
///
/// Implemented for every `Fn(&WriterEnv, &T) -> Option<JsValue>` closure that
/// is `Send + Sync`.
pub trait Writer<T>: Send + Sync {
    /// Writes `value`, or returns None to write nothing.
    fn write(&self, env: &WriterEnv, value: &T) -> Option<JsValue>;
}

impl<T, F> Writer<T> for F
where
    F: Fn(&WriterEnv, &T) -> Option<JsValue> + Send + Sync,
{
    fn write(&self, env: &WriterEnv, value: &T) -> Option<JsValue> {
        self(env, value)
    }
}

/// A shared, composable writer.
pub struct JsWriter<T> {
    inner: Arc<dyn Writer<T>>,
}

impl<T> Clone for JsWriter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for JsWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsWriter").finish_non_exhaustive()
    }
}

impl<T: 'static> JsWriter<T> {
    /// Wraps a writer implementation.
    pub fn new(writer: impl Writer<T> + 'static) -> Self {
        Self {
            inner: Arc::new(writer),
        }
    }

    /// Wraps a writer closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&WriterEnv, &T) -> Option<JsValue> + Send + Sync + 'static,
    {
        Self::new(f)
    }

    /// Writes `value`, or returns None to write nothing.
    pub fn write(&self, env: &WriterEnv, value: &T) -> Option<JsValue> {
        self.inner.write(env, value)
    }

    /// Adapts this writer to a type that can be converted to `T`.
    pub fn contramap<S: 'static>(self, f: impl Fn(&S) -> T + Send + Sync + 'static) -> JsWriter<S> {
        JsWriter::from_fn(move |env: &WriterEnv, value: &S| self.write(env, &f(value)))
    }
}
