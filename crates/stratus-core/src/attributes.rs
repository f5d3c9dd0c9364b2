//! Declared-configuration attribute store
//!
//! The store is a flat map from attribute name to a JSON value plus the
//! identity of the remote resource it describes. Grouped attributes are
//! stored as a list holding at most one object. Typed access goes through
//! serde, so a value written as an integer is read back as an integer and a
//! mismatch is reported instead of coerced.

use crate::error::{CloudError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Accessors the reconciler needs from a declared-configuration record
pub trait AttributeStore: Send {
    /// Recorded identity of the remote resource, if any
    fn id(&self) -> Option<&str>;

    /// Record (or clear with `None`) the identity of the remote resource
    fn set_id(&mut self, id: Option<String>);

    fn get(&self, name: &str) -> Option<&Value>;

    fn set(&mut self, name: &str, value: Value);
}

/// Typed helpers on top of [`AttributeStore`]
pub trait AttributeStoreExt: AttributeStore {
    /// Read an optional attribute; `null` and absent are both `None`
    fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| CloudError::attribute(name, format!("unexpected value type: {}", e))),
        }
    }

    /// Read an attribute that must be set
    fn require<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.get_as(name)?
            .ok_or_else(|| CloudError::attribute(name, "required attribute is not set"))
    }

    fn set_as<T: Serialize>(&mut self, name: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(name, value);
        Ok(())
    }

    /// Read a grouped attribute modelled as a list of at most one element
    ///
    /// Only the first element is considered; the item limit is enforced by
    /// the schema that produced the record.
    fn get_block<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let blocks: Option<Vec<T>> = self.get_as(name)?;
        Ok(blocks.and_then(|b| b.into_iter().next()))
    }

    fn set_block<T: Serialize>(&mut self, name: &str, block: Option<T>) -> Result<()> {
        let blocks: Vec<T> = block.into_iter().collect();
        self.set_as(name, blocks)
    }
}

impl<S: AttributeStore + ?Sized> AttributeStoreExt for S {}
