//! In-memory record of a managed resource
//!
//! [`ResourceState`] holds the identity of the remote resource and the last
//! declared or refreshed attributes. Where the record is stored between runs
//! is up to the caller; it serializes with serde.

use crate::attributes::AttributeStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Recorded state of a single resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceState {
    /// Identity of the remote resource; `None` until created or imported
    pub id: Option<String>,

    /// Resource type (e.g. "mysql_server")
    pub resource_type: String,

    /// Declared and computed attributes
    pub attributes: BTreeMap<String, Value>,

    /// Last time the identity or an attribute changed
    pub updated_at: DateTime<Utc>,
}

impl ResourceState {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            id: None,
            resource_type: resource_type.into(),
            attributes: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl AttributeStore for ResourceState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
        self.touch();
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    fn set(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
        self.touch();
    }
}
