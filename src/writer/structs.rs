//! The struct writer.

use std::fmt;
use std::sync::Arc;

use super::{EmptyResultAction, JsWriter, WriterEnv};
use crate::value::{JsStruct, JsValue};

type FieldWriter<T> = Arc<dyn Fn(&WriterEnv, &T) -> Option<JsValue> + Send + Sync>;

/// Builds a writer that turns `T` into a struct, one property at a time.
///
/// Properties are written in declaration order. A property whose writer
/// returns nothing is omitted. If no property was written, the empty action
/// decides the result (the environment's default unless set with
/// [`StructWriterBuilder::on_empty`]).
pub struct StructWriterBuilder<T> {
    properties: Vec<(String, FieldWriter<T>)>,
    on_empty: Option<EmptyResultAction>,
}

impl<T> fmt::Debug for StructWriterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.properties.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("StructWriterBuilder")
            .field("properties", &names)
            .field("on_empty", &self.on_empty)
            .finish()
    }
}

impl<T: 'static> Default for StructWriterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> StructWriterBuilder<T> {
    /// Creates a builder with no properties.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            on_empty: None,
        }
    }

    /// Declares a property written under `name` from the part of `T` that
    /// `getter` selects.
    pub fn property<P, G>(mut self, name: impl Into<String>, getter: G, writer: JsWriter<P>) -> Self
    where
        P: 'static,
        G: Fn(&T) -> &P + Send + Sync + 'static,
    {
        let field: FieldWriter<T> = Arc::new(move |env: &WriterEnv, value: &T| writer.write(env, getter(value)));
        self.properties.push((name.into(), field));
        self
    }

    /// Sets what an empty struct becomes, overriding the environment default.
    pub fn on_empty(mut self, action: EmptyResultAction) -> Self {
        self.on_empty = Some(action);
        self
    }

    /// Builds the writer.
    pub fn build(self) -> JsWriter<T> {
        JsWriter::from_fn(move |env: &WriterEnv, value: &T| {
            let fields: JsStruct = self
                .properties
                .iter()
                .filter_map(|(name, field)| field(env, value).map(|written| (name.as_str(), written)))
                .collect();
            if fields.is_empty() {
                let action = self.on_empty.unwrap_or_else(|| env.options().struct_empty());
                action.apply(JsValue::Struct(fields))
            } else {
                Some(JsValue::Struct(fields))
            }
        })
    }
}
