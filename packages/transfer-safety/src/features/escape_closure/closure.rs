//! Points-to closure over the heap graph

use petgraph::visit::Dfs;
use rustc_hash::FxHashSet;
use std::sync::Arc;

use super::cache::ClosureCache;
use crate::features::points_to::domain::{AbstractReference, HeapGraph, HeapNode};
use crate::shared::models::ObjectId;

/// Set of abstract objects
pub type ObjectSet = FxHashSet<ObjectId>;

/// Every object reachable from `reference` in `heap`
///
/// Pure function of the reference and the heap snapshot. Empty when the
/// reference points to nothing or is absent from the graph.
///
/// Time: O(reachable subgraph)
pub fn points_to_closure(reference: &AbstractReference, heap: &HeapGraph) -> ObjectSet {
    let mut reached = ObjectSet::default();
    let Some(start) = heap.reference_index(reference) else {
        return reached;
    };

    let graph = heap.graph();
    let mut dfs = Dfs::new(graph, start);
    while let Some(idx) = dfs.next(graph) {
        if let HeapNode::Object(id) = graph[idx] {
            reached.insert(id);
        }
    }
    reached
}

/// Closure computation against one heap snapshot
#[derive(Debug, Clone, Copy)]
pub struct EscapeClosureComputer<'a> {
    heap: &'a HeapGraph,
    cache: Option<&'a ClosureCache>,
}

impl<'a> EscapeClosureComputer<'a> {
    /// Uncached computer
    pub fn new(heap: &'a HeapGraph) -> Self {
        Self { heap, cache: None }
    }

    /// Computer sharing a run-scoped cache
    pub fn with_cache(heap: &'a HeapGraph, cache: &'a ClosureCache) -> Self {
        Self {
            heap,
            cache: Some(cache),
        }
    }

    #[inline]
    pub fn heap(&self) -> &'a HeapGraph {
        self.heap
    }

    /// Escape closure of one reference
    pub fn closure(&self, reference: &AbstractReference) -> Arc<ObjectSet> {
        match self.cache {
            Some(cache) => cache.get_or_compute(self.heap, reference),
            None => Arc::new(points_to_closure(reference, self.heap)),
        }
    }

    /// Union of the closures of every reference
    pub fn closure_of_all<'r>(
        &self,
        references: impl IntoIterator<Item = &'r AbstractReference>,
    ) -> ObjectSet {
        let mut objects = ObjectSet::default();
        for reference in references {
            objects.extend(self.closure(reference).iter().copied());
        }
        objects
    }
}
