//! The array writer.

use std::fmt;

use super::{EmptyResultAction, JsWriter, WriterEnv};
use crate::value::JsValue;

/// Builds a writer that writes every element of a `Vec<T>`.
///
/// Elements written as nothing are omitted. If nothing was written, the
/// empty action decides the result.
pub struct ArrayWriterBuilder<T> {
    items: JsWriter<T>,
    on_empty: Option<EmptyResultAction>,
}

impl<T> fmt::Debug for ArrayWriterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayWriterBuilder")
            .field("on_empty", &self.on_empty)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ArrayWriterBuilder<T> {
    /// Creates a builder writing elements with `items`.
    pub fn new(items: JsWriter<T>) -> Self {
        Self { items, on_empty: None }
    }

    /// Sets what an empty array becomes, overriding the environment default.
    pub fn on_empty(mut self, action: EmptyResultAction) -> Self {
        self.on_empty = Some(action);
        self
    }

    /// Builds the writer.
    pub fn build(self) -> JsWriter<Vec<T>> {
        JsWriter::from_fn(move |env: &WriterEnv, values: &Vec<T>| {
            let items: Vec<JsValue> = values
                .iter()
                .filter_map(|value| self.items.write(env, value))
                .collect();
            if items.is_empty() {
                let action = self.on_empty.unwrap_or_else(|| env.options().array_empty());
                action.apply(JsValue::Array(items))
            } else {
                Some(JsValue::Array(items))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::primitives::{array, int, nullable, optional};
    use crate::writer::WriterOptions;

    #[test]
    fn test_writes_elements() {
        let value = array(int()).write(&WriterEnv::default(), &vec![1, 2]);
        assert_eq!(value, Some(JsValue::array([JsValue::from(1), JsValue::from(2)])));
    }

    #[test]
    fn test_optional_elements_are_omitted_nullable_kept() {
        let env = WriterEnv::default();
        let values = vec![Some(1), None, Some(3)];

        let omitted = array(optional(int())).write(&env, &values).unwrap();
        assert_eq!(omitted.as_array().map(|a| a.len()), Some(2));

        let nulls = array(nullable(int())).write(&env, &values).unwrap();
        assert_eq!(nulls.as_array().map(|a| a[1].is_null()), Some(true));
    }

    #[test]
    fn test_empty_actions() {
        let env = WriterEnv::default();
        let empty: Vec<i32> = Vec::new();

        assert_eq!(array(int()).write(&env, &empty), Some(JsValue::array([])));

        let null = ArrayWriterBuilder::new(int()).on_empty(EmptyResultAction::ReturnNullValue).build();
        assert_eq!(null.write(&env, &empty), Some(JsValue::Null));

        let nothing_env = WriterEnv::new(WriterOptions::new().with_array_empty(EmptyResultAction::ReturnNothing));
        assert_eq!(array(int()).write(&nothing_env, &empty), None);
    }

    #[test]
    fn test_all_elements_omitted_counts_as_empty() {
        let writer = ArrayWriterBuilder::new(optional(int()))
            .on_empty(EmptyResultAction::ReturnNothing)
            .build();
        assert_eq!(writer.write(&WriterEnv::default(), &vec![None, None]), None);
    }
}
