//! Heap Graph
//!
//! Read-only directed graph over abstract references and abstract objects:
//! - reference → object : the reference may point to the object
//! - object → reference : the object owns a field / array-contents reference
//!
//! Every built graph carries a process-unique `generation` so run-scoped
//! caches can tell a rebuilt graph from the one they were filled against.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::abstract_object::AbstractObject;
use super::abstract_reference::AbstractReference;
use crate::shared::models::ObjectId;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Heap graph vertex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeapNode {
    Reference(AbstractReference),
    Object(ObjectId),
}

/// Immutable heap graph snapshot
#[derive(Debug, Clone)]
pub struct HeapGraph {
    graph: DiGraph<HeapNode, ()>,
    references: FxHashMap<AbstractReference, NodeIndex>,
    objects: FxHashMap<ObjectId, NodeIndex>,
    registry: FxHashMap<ObjectId, AbstractObject>,
    generation: u64,
}

impl HeapGraph {
    pub fn builder() -> HeapGraphBuilder {
        HeapGraphBuilder::new()
    }

    /// Empty graph (every closure is empty)
    pub fn empty() -> Self {
        HeapGraphBuilder::new().build()
    }

    /// Snapshot stamp; differs for every `build()`
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub(crate) fn graph(&self) -> &DiGraph<HeapNode, ()> {
        &self.graph
    }

    #[inline]
    pub(crate) fn reference_index(&self, reference: &AbstractReference) -> Option<NodeIndex> {
        self.references.get(reference).copied()
    }

    /// Registered object metadata
    #[inline]
    pub fn object(&self, id: ObjectId) -> Option<&AbstractObject> {
        self.registry.get(&id)
    }

    /// Object label for reports: allocation site when registered, id otherwise
    pub fn object_label(&self, id: ObjectId) -> String {
        self.registry
            .get(&id)
            .map(|obj| obj.to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// Objects a reference points to directly (no closure)
    pub fn points_to(&self, reference: &AbstractReference) -> Vec<ObjectId> {
        let Some(idx) = self.reference_index(reference) else {
            return Vec::new();
        };
        self.graph
            .neighbors(idx)
            .filter_map(|n| match self.graph[n] {
                HeapNode::Object(id) => Some(id),
                HeapNode::Reference(_) => None,
            })
            .collect()
    }

    pub fn references(&self) -> impl Iterator<Item = &AbstractReference> + '_ {
        self.references.keys()
    }

    #[inline]
    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Builder for [`HeapGraph`]
#[derive(Debug, Default)]
pub struct HeapGraphBuilder {
    graph: DiGraph<HeapNode, ()>,
    references: FxHashMap<AbstractReference, NodeIndex>,
    objects: FxHashMap<ObjectId, NodeIndex>,
    registry: FxHashMap<ObjectId, AbstractObject>,
}

impl HeapGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register object metadata (objects used in edges need not be registered)
    pub fn add_object(&mut self, object: AbstractObject) -> &mut Self {
        self.object_node(object.id);
        self.registry.insert(object.id, object);
        self
    }

    /// reference → object
    pub fn points_to(&mut self, reference: AbstractReference, object: ObjectId) -> &mut Self {
        let from = self.reference_node(reference);
        let to = self.object_node(object);
        self.graph.update_edge(from, to, ());
        self
    }

    /// owner.field → target
    pub fn field(&mut self, owner: ObjectId, field: &str, target: ObjectId) -> &mut Self {
        self.owned_reference(owner, AbstractReference::instance_field(owner, field), target)
    }

    /// owner[] → target
    pub fn array_element(&mut self, owner: ObjectId, target: ObjectId) -> &mut Self {
        self.owned_reference(owner, AbstractReference::array_contents(owner), target)
    }

    fn owned_reference(
        &mut self,
        owner: ObjectId,
        reference: AbstractReference,
        target: ObjectId,
    ) -> &mut Self {
        let owner_idx = self.object_node(owner);
        let ref_idx = self.reference_node(reference);
        self.graph.update_edge(owner_idx, ref_idx, ());
        let target_idx = self.object_node(target);
        self.graph.update_edge(ref_idx, target_idx, ());
        self
    }

    fn reference_node(&mut self, reference: AbstractReference) -> NodeIndex {
        if let Some(&idx) = self.references.get(&reference) {
            return idx;
        }
        let idx = self.graph.add_node(HeapNode::Reference(reference.clone()));
        self.references.insert(reference, idx);
        idx
    }

    fn object_node(&mut self, id: ObjectId) -> NodeIndex {
        if let Some(&idx) = self.objects.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(HeapNode::Object(id));
        self.objects.insert(id, idx);
        idx
    }

    pub fn build(self) -> HeapGraph {
        HeapGraph {
            graph: self.graph,
            references: self.references,
            objects: self.objects,
            registry: self.registry,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }
}
