//! Domain models for the points-to boundary
//!
//! - AbstractReference: one variable/slot's possible values
//! - AbstractObject: allocation-site abstraction
//! - CallGraph: method activation contexts
//! - HeapGraph: points-to and field edges

pub mod abstract_object;
pub mod abstract_reference;
pub mod call_graph;
pub mod heap_graph;

pub use abstract_object::AbstractObject;
pub use abstract_reference::AbstractReference;
pub use call_graph::{CallGraph, CallGraphNode};
pub use heap_graph::{HeapGraph, HeapGraphBuilder, HeapNode};
