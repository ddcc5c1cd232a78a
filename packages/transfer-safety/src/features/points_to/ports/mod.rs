//! Ports (Interfaces) for the points-to boundary

use crate::features::points_to::domain::{AbstractReference, CallGraph, CallGraphNode, HeapGraph};
use crate::shared::models::Slot;
use crate::shared::ports::Analysis;

/// Completed whole-program pointer analysis
///
/// # Example (Generic - Zero-cost)
/// ```ignore
/// fn escaped_roots<O: PointerAnalysisOracle>(oracle: &O, node: &CallGraphNode) -> usize {
///     oracle.heap_graph().points_to(&oracle.reference_for(node, Slot(1))).len()
/// }
/// ```
pub trait PointerAnalysisOracle: Analysis + Send + Sync {
    /// Whole-program call graph
    fn call_graph(&self) -> &CallGraph;

    /// Heap (points-to) graph
    fn heap_graph(&self) -> &HeapGraph;

    /// Abstract reference for a local slot in a call-graph node
    fn reference_for(&self, node: &CallGraphNode, slot: Slot) -> AbstractReference;
}
