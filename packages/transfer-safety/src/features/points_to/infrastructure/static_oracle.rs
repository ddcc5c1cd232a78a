//! Static Pointer Analysis
//!
//! Oracle over a call graph and heap graph that were computed elsewhere
//! (loaded from a program model or assembled in tests). `perform` checks that
//! the two graphs agree with each other.

use tracing::debug;

use crate::errors::{Result, TransferError};
use crate::features::points_to::domain::{AbstractReference, CallGraph, CallGraphNode, HeapGraph};
use crate::features::points_to::ports::PointerAnalysisOracle;
use crate::shared::models::Slot;
use crate::shared::ports::Analysis;

/// In-memory pointer analysis oracle
#[derive(Debug, Clone)]
pub struct StaticPointerAnalysis {
    call_graph: CallGraph,
    heap: HeapGraph,
    performed: bool,
}

impl StaticPointerAnalysis {
    pub fn new(call_graph: CallGraph, heap: HeapGraph) -> Self {
        Self {
            call_graph,
            heap,
            performed: false,
        }
    }

    /// Replace the heap graph (e.g., after re-running the points-to solver)
    pub fn rebuild_heap(&mut self, heap: HeapGraph) {
        self.heap = heap;
        self.performed = false;
    }
}

impl Analysis for StaticPointerAnalysis {
    fn name(&self) -> &'static str {
        "pointer-analysis"
    }

    fn perform(&mut self) -> Result<()> {
        if self.performed {
            return Ok(());
        }

        if let Some(dangling) = self
            .heap
            .references()
            .filter_map(AbstractReference::node)
            .find(|node| !self.call_graph.contains(*node))
        {
            return Err(TransferError::collaborator(
                self.name(),
                format!("heap graph has a local of unknown call-graph node {}", dangling),
            ));
        }

        debug!(
            "pointer analysis ready: {} nodes, {} references, {} objects",
            self.call_graph.len(),
            self.heap.reference_count(),
            self.heap.object_count()
        );
        self.performed = true;
        Ok(())
    }

    fn has_been_performed(&self) -> bool {
        self.performed
    }
}

impl PointerAnalysisOracle for StaticPointerAnalysis {
    fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    fn heap_graph(&self) -> &HeapGraph {
        &self.heap
    }

    fn reference_for(&self, node: &CallGraphNode, slot: Slot) -> AbstractReference {
        AbstractReference::local(node.id, slot)
    }
}
