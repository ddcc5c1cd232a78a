//! # Points-to Oracle Boundary
//!
//! The verifier never builds a call graph or a heap graph itself. It consumes
//! a completed whole-program pointer analysis through [`PointerAnalysisOracle`]:
//! - **CallGraph**: method activation contexts and call edges
//! - **HeapGraph**: references → objects, objects → field/array references
//! - **reference_for**: the abstract reference of a local slot in a node
//!
//! [`StaticPointerAnalysis`] is the in-memory oracle used by the pipeline,
//! the CLI and the tests.

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for public API
pub use domain::abstract_object::AbstractObject;
pub use domain::abstract_reference::AbstractReference;
pub use domain::call_graph::{CallGraph, CallGraphNode};
pub use domain::heap_graph::{HeapGraph, HeapGraphBuilder, HeapNode};
pub use infrastructure::StaticPointerAnalysis;
pub use ports::PointerAnalysisOracle;
