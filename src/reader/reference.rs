//! Late-bound readers for recursive document shapes.
//!
//! A [`ReaderRef`] is a named slot. Readers obtained from it with
//! [`ReaderRef::reader`] can be used inside the very reader that is later
//! stored in the slot with [`ReaderRef::define`].
//!
//! The slot and the reader stored in it refer to each other, so a defined
//! slot lives as long as the process. Define recursive readers once, at
//! startup.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use super::JsReader;
use crate::env::ReaderEnv;
use crate::error::{JsError, ReferenceError};
use crate::location::Location;
use crate::result::JsResult;
use crate::value::JsValue;

type Slot<EB, T> = Arc<RwLock<Option<JsReader<EB, T>>>>;

/// A named slot holding a reader that may be defined after it is used.
///
/// # Example
///
/// ```rust
/// use assay::reader::property;
/// use assay::{readers, DefaultErrorBuilders, JsValue, ReaderEnv, ReaderRef, StructReaderBuilder};
///
/// #[derive(Debug, PartialEq)]
/// struct Category {
///     name: String,
///     children: Vec<Category>,
/// }
///
/// let category = ReaderRef::<DefaultErrorBuilders, Category>::new("category");
///
/// let mut builder = StructReaderBuilder::new();
/// let name = builder.property(property::required("name", readers::string()));
/// let children = builder.property(property::defaultable(
///     "children",
///     readers::array(category.reader()),
///     |_| Vec::new(),
/// ));
/// category
///     .define(builder.build(move |mut values| Category {
///         name: values.take(name),
///         children: values.take(children),
///     }))
///     .unwrap();
///
/// let json = r#"{"name": "root", "children": [{"name": "leaf"}]}"#;
/// let tree = category.reader().read_root(&ReaderEnv::default(), &JsValue::parse(json).unwrap());
/// assert_eq!(tree.ok().map(|c| c.children.len()), Some(1));
/// ```
pub struct ReaderRef<EB, T> {
    name: Arc<str>,
    slot: Slot<EB, T>,
}

impl<EB, T> Clone for ReaderRef<EB, T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<EB, T> fmt::Debug for ReaderRef<EB, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderRef")
            .field("name", &self.name)
            .field("defined", &self.slot.read().is_some())
            .finish()
    }
}

impl<EB: 'static, T: 'static> ReaderRef<EB, T> {
    /// Creates an empty slot.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the name of the slot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true once a reader was defined.
    pub fn is_defined(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Stores the reader in the slot.
    ///
    /// Returns `ReferenceError::AlreadyDefined` if the slot is already set.
    pub fn define(&self, reader: JsReader<EB, T>) -> Result<(), ReferenceError> {
        let mut slot = self.slot.write();
        if slot.is_some() {
            return Err(ReferenceError::AlreadyDefined(self.name.to_string()));
        }
        *slot = Some(reader);
        Ok(())
    }

    /// Returns a reader that delegates to whatever the slot holds at read time.
    ///
    /// Reading through an undefined slot fails with
    /// `JsError::UnresolvedReference`.
    pub fn reader(&self) -> JsReader<EB, T> {
        let name = Arc::clone(&self.name);
        let slot = Arc::clone(&self.slot);
        JsReader::from_fn(move |env: &ReaderEnv<EB>, location: &Location, source: &JsValue| {
            // The guard is released before reading so recursive reads never nest locks.
            let reader = slot.read().clone();
            match reader {
                Some(reader) => reader.read(env, location, source),
                None => {
                    warn!(name = %name, %location, "read through undefined reader reference");
                    JsResult::fail(
                        location.clone(),
                        JsError::UnresolvedReference {
                            name: name.to_string(),
                        },
                    )
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DefaultErrorBuilders;
    use crate::reader::primitives::int;

    type EB = DefaultErrorBuilders;

    #[test]
    fn test_undefined_reference_fails() {
        let slot = ReaderRef::<EB, i32>::new("number");
        assert!(!slot.is_defined());
        let failure = slot
            .reader()
            .read(&ReaderEnv::default(), &Location::root().key("n"), &JsValue::from(1))
            .into_result()
            .unwrap_err();
        assert_eq!(failure.first().location.to_string(), "#/n");
        assert_eq!(
            failure.first().error(),
            &JsError::UnresolvedReference {
                name: "number".to_string()
            }
        );
    }

    #[test]
    fn test_reader_taken_before_define_sees_definition() {
        let slot = ReaderRef::<EB, i32>::new("number");
        let reader = slot.reader();
        slot.define(int()).unwrap();
        assert!(slot.is_defined());
        assert_eq!(reader.read_root(&ReaderEnv::default(), &JsValue::from(5)).ok(), Some(5));
    }

    #[test]
    fn test_define_twice() {
        let slot = ReaderRef::<EB, i32>::new("number");
        slot.define(int()).unwrap();
        assert_eq!(
            slot.define(int()),
            Err(ReferenceError::AlreadyDefined("number".to_string()))
        );
    }
}
