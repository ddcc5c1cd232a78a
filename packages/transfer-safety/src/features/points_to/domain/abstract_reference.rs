//! Abstract Reference
//!
//! Static model of one variable's (or heap slot's) possible runtime values.
//! The set of reference kinds is closed: locals of a call-graph node, fields
//! and array contents of an abstract object, and static fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{NodeId, ObjectId, Slot};

/// Abstract reference (WALA-style pointer key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbstractReference {
    /// Local slot of a call-graph node
    Local { node: NodeId, slot: Slot },

    /// Instance field of an abstract object
    InstanceField { object: ObjectId, field: String },

    /// Contents of an abstract array object
    ArrayContents { object: ObjectId },

    /// Static (class-level) field
    StaticField { field: String },
}

impl AbstractReference {
    #[inline]
    pub fn local(node: NodeId, slot: Slot) -> Self {
        Self::Local { node, slot }
    }

    pub fn instance_field(object: ObjectId, field: impl Into<String>) -> Self {
        Self::InstanceField {
            object,
            field: field.into(),
        }
    }

    #[inline]
    pub fn array_contents(object: ObjectId) -> Self {
        Self::ArrayContents { object }
    }

    pub fn static_field(field: impl Into<String>) -> Self {
        Self::StaticField {
            field: field.into(),
        }
    }

    /// Node owning this reference, for locals
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Local { node, .. } => Some(*node),
            _ => None,
        }
    }

    /// Object owning this reference, for fields and array contents
    #[inline]
    pub fn owner(&self) -> Option<ObjectId> {
        match self {
            Self::InstanceField { object, .. } | Self::ArrayContents { object } => Some(*object),
            _ => None,
        }
    }
}

impl fmt::Display for AbstractReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { node, slot } => write!(f, "{}:{}", node, slot),
            Self::InstanceField { object, field } => write!(f, "{}.{}", object, field),
            Self::ArrayContents { object } => write!(f, "{}[]", object),
            Self::StaticField { field } => write!(f, "static {}", field),
        }
    }
}
