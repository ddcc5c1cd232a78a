//! Program Model
//!
//! Serializable description of one capsule template's completed static
//! model: call graph, heap graph, transferring sites and both liveness
//! tables. `into_collaborators` turns it into performed-ready analyses.
//!
//! ```json
//! {
//!   "capsuleTemplate": "org/demo/Master",
//!   "nodes": [{ "id": 1, "method": "Master.run()V" }],
//!   "objects": [{ "id": 4, "allocationSite": "Master.run@3", "typeName": "Buf" }],
//!   "pointsTo": [{ "reference": { "local": { "node": 1, "slot": 2 } }, "objects": [4] }],
//!   "sites": [{ "node": 1, "kind": "return", "instruction": 9, "transfers": [2] }]
//! }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::errors::{Result, TransferError};
use crate::features::liveness::{TableCallGraphLiveness, TableTransferLiveness};
use crate::features::points_to::domain::{
    AbstractObject, AbstractReference, CallGraph, CallGraphNode, HeapGraph,
};
use crate::features::points_to::StaticPointerAnalysis;
use crate::features::site_analysis::{SiteKind, TableSiteClassifier, TransferringSite};
use crate::features::transfer_safety::CapsuleTemplate;
use crate::shared::models::{NodeId, ObjectId, Slot};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramModel {
    pub capsule_template: String,
    #[serde(default)]
    pub nodes: Vec<CallGraphNode>,
    /// Caller → callee edges
    #[serde(default)]
    pub calls: Vec<(NodeId, NodeId)>,
    #[serde(default)]
    pub objects: Vec<AbstractObject>,
    #[serde(default)]
    pub points_to: Vec<PointsToEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub arrays: Vec<ArrayEntry>,
    #[serde(default)]
    pub sites: Vec<SiteEntry>,
    #[serde(default)]
    pub live_after_node: Vec<NodeLivenessEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsToEntry {
    pub reference: AbstractReference,
    pub objects: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub owner: ObjectId,
    pub field: String,
    pub targets: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayEntry {
    pub owner: ObjectId,
    pub elements: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    pub node: NodeId,
    #[serde(flatten)]
    pub kind: SiteKind,
    pub transfers: Vec<Slot>,
    /// References live immediately after the site, in its own node
    #[serde(default)]
    pub live_after: Vec<AbstractReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLivenessEntry {
    pub node: NodeId,
    pub references: Vec<AbstractReference>,
}

/// Owned collaborators built from a [`ProgramModel`]
#[derive(Debug, Clone)]
pub struct ProgramCollaborators {
    pub template: CapsuleTemplate,
    pub oracle: StaticPointerAnalysis,
    pub classifier: TableSiteClassifier,
    pub local_liveness: TableTransferLiveness,
    pub global_liveness: TableCallGraphLiveness,
}

impl ProgramModel {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the collaborators; site and liveness entries must name known nodes
    pub fn into_collaborators(self) -> Result<ProgramCollaborators> {
        let mut call_graph = CallGraph::new();
        let mut by_id: FxHashMap<NodeId, CallGraphNode> = FxHashMap::default();
        for node in self.nodes {
            by_id.entry(node.id).or_insert_with(|| node.clone());
            call_graph.add_node(node);
        }
        for (caller, callee) in self.calls {
            call_graph.add_call(caller, callee)?;
        }

        let mut heap = HeapGraph::builder();
        for object in self.objects {
            heap.add_object(object);
        }
        for entry in self.points_to {
            for object in entry.objects {
                heap.points_to(entry.reference.clone(), object);
            }
        }
        for entry in &self.fields {
            for &target in &entry.targets {
                heap.field(entry.owner, &entry.field, target);
            }
        }
        for entry in &self.arrays {
            for &element in &entry.elements {
                heap.array_element(entry.owner, element);
            }
        }
        let heap = heap.build();

        let node_for = |id: NodeId| by_id.get(&id).cloned().ok_or(TransferError::UnknownNode(id));

        let mut classifier = TableSiteClassifier::new();
        let mut local_liveness = TableTransferLiveness::new();
        for entry in self.sites {
            let site = TransferringSite::new(node_for(entry.node)?, entry.kind, entry.transfers);
            local_liveness.add(site.clone(), entry.live_after);
            classifier.add_site(site);
        }

        let mut global_liveness = TableCallGraphLiveness::new();
        for entry in self.live_after_node {
            node_for(entry.node)?;
            global_liveness.add(entry.node, entry.references);
        }

        debug!(
            "program model: {} nodes, {} objects, {} sites",
            call_graph.len(),
            heap.object_count(),
            classifier.site_count()
        );

        Ok(ProgramCollaborators {
            template: CapsuleTemplate::new(self.capsule_template),
            oracle: StaticPointerAnalysis::new(call_graph, heap),
            classifier,
            local_liveness,
            global_liveness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ports::Analysis;

    const MODEL: &str = r#"{
        "capsuleTemplate": "org/demo/Master",
        "nodes": [
            { "id": 1, "method": "Master.run()V" },
            { "id": 2, "method": "Master.send(LBuf;)V" }
        ],
        "calls": [[1, 2]],
        "objects": [
            { "id": 4, "allocationSite": "Master.run@3", "typeName": "Buf" }
        ],
        "pointsTo": [
            { "reference": { "local": { "node": 1, "slot": 2 } }, "objects": [4] }
        ],
        "sites": [
            { "node": 1, "kind": "invocation", "callee": "Worker.take(LBuf;)V",
              "instruction": 7, "transfers": [2],
              "liveAfter": [{ "local": { "node": 1, "slot": 2 } }] }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let model = ProgramModel::from_json_str(MODEL).unwrap();
        assert_eq!(model.nodes.len(), 2);
        assert_eq!(model.sites.len(), 1);

        let mut collaborators = model.into_collaborators().unwrap();
        assert_eq!(collaborators.template.qualified_name(), "org/demo/Master");
        assert_eq!(collaborators.classifier.site_count(), 1);
        collaborators.oracle.perform().unwrap();
        assert!(collaborators.oracle.has_been_performed());
    }

    #[test]
    fn test_dangling_site_node_rejected() {
        let mut model = ProgramModel::from_json_str(MODEL).unwrap();
        model.sites[0].node = NodeId(99);
        assert!(matches!(
            model.into_collaborators(),
            Err(TransferError::UnknownNode(NodeId(99)))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ProgramModel::from_json_str("{ \"nodes\": 3 }"),
            Err(TransferError::Json(_))
        ));
    }
}
