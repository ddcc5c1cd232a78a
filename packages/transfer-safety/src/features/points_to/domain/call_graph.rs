//! Call Graph
//!
//! Whole-program call graph over method activation contexts. Supplied by the
//! pointer analysis and never mutated by the verifier.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::{Result, TransferError};
use crate::shared::models::{MethodId, NodeId};

/// One method activation context. Identity is the node id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallGraphNode {
    pub id: NodeId,
    pub method: MethodId,
    /// Calling context (e.g., receiver allocation site), if context-sensitive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl CallGraphNode {
    pub fn new(id: NodeId, method: impl Into<MethodId>) -> Self {
        Self {
            id,
            method: method.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl PartialEq for CallGraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CallGraphNode {}

impl Hash for CallGraphNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for CallGraphNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CallGraphNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for CallGraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context {
            Some(ref ctx) => write!(f, "{}[{} @ {}]", self.id, self.method, ctx),
            None => write!(f, "{}[{}]", self.id, self.method),
        }
    }
}

/// Call graph backed by a petgraph `DiGraph`
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: DiGraph<CallGraphNode, ()>,
    index: FxHashMap<NodeId, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; re-adding an existing id keeps the first node
    pub fn add_node(&mut self, node: CallGraphNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Add a call edge between two existing nodes
    pub fn add_call(&mut self, caller: NodeId, callee: NodeId) -> Result<()> {
        let from = *self
            .index
            .get(&caller)
            .ok_or(TransferError::UnknownNode(caller))?;
        let to = *self
            .index
            .get(&callee)
            .ok_or(TransferError::UnknownNode(callee))?;
        self.graph.update_edge(from, to, ());
        Ok(())
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&CallGraphNode> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Direct callees of a node (empty for unknown ids)
    pub fn callees(&self, id: NodeId) -> Vec<&CallGraphNode> {
        match self.index.get(&id) {
            Some(&idx) => self.graph.neighbors(idx).map(|n| &self.graph[n]).collect(),
            None => Vec::new(),
        }
    }

    /// All nodes whose method is `method`
    pub fn nodes_of<'a>(&'a self, method: &'a MethodId) -> impl Iterator<Item = &'a CallGraphNode> + 'a {
        self.nodes().filter(move |n| &n.method == method)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CallGraphNode> + '_ {
        self.graph.node_weights()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
