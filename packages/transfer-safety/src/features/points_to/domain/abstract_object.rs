//! Abstract Object
//!
//! An equivalence class of runtime objects: every `new T()` at one allocation
//! site (in one context) maps to one abstract object. Identity is the id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::shared::models::ObjectId;

/// Abstract heap object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractObject {
    /// Unique numeric ID
    pub id: ObjectId,

    /// Human-readable allocation site (e.g., "Foo.run()V@12:new Buffer")
    pub allocation_site: String,

    /// Allocated type (if known)
    #[serde(default)]
    pub type_name: Option<String>,
}

impl AbstractObject {
    pub fn new(id: ObjectId, allocation_site: impl Into<String>) -> Self {
        Self {
            id,
            allocation_site: allocation_site.into(),
            type_name: None,
        }
    }

    /// Create with type information
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

impl PartialEq for AbstractObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AbstractObject {}

impl Hash for AbstractObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for AbstractObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name {
            Some(ref type_name) => write!(f, "{}:{}", self.allocation_site, type_name),
            None => f.write_str(&self.allocation_site),
        }
    }
}
