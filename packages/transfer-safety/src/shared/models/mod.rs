//! Identifier models

pub mod ids;

pub use ids::{MethodId, NodeId, ObjectId, Slot};
