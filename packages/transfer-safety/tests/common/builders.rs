//! Program builders

use transfer_safety::{
    AbstractObject, AbstractReference, CallGraph, CallGraphNode, CapsuleTemplate, HeapGraph,
    HeapGraphBuilder, NodeId, ObjectId, ProgramCollaborators, ResultsIndex, Slot,
    StaticPointerAnalysis, TableCallGraphLiveness, TableSiteClassifier, TableTransferLiveness,
    TransferSafetyPipeline, TransferringSite, VerifierConfig,
};

pub const TEMPLATE: &str = "org/demo/Master";

pub fn local(node: u32, slot: u32) -> AbstractReference {
    AbstractReference::local(NodeId(node), Slot(slot))
}

/// Builder for a single capsule template's collaborators
pub struct ProgramBuilder {
    template: CapsuleTemplate,
    call_graph: CallGraph,
    heap: HeapGraphBuilder,
    classifier: TableSiteClassifier,
    local_liveness: TableTransferLiveness,
    global_liveness: TableCallGraphLiveness,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self {
            template: CapsuleTemplate::new(TEMPLATE),
            call_graph: CallGraph::new(),
            heap: HeapGraph::builder(),
            classifier: TableSiteClassifier::new(),
            local_liveness: TableTransferLiveness::new(),
            global_liveness: TableCallGraphLiveness::new(),
        }
    }

    pub fn node(mut self, id: u32, method: &str) -> Self {
        self.call_graph.add_node(CallGraphNode::new(NodeId(id), method));
        self
    }

    /// The call-graph node added under `id`
    pub fn cg_node(&self, id: u32) -> CallGraphNode {
        self.call_graph
            .node(NodeId(id))
            .cloned()
            .unwrap_or_else(|| panic!("node {} not added", id))
    }

    pub fn object(mut self, id: u32) -> Self {
        self.heap
            .add_object(AbstractObject::new(ObjectId(id), format!("alloc@{}", id)).with_type("Buf"));
        self
    }

    /// `node`'s local `slot` points to `object`
    pub fn points_to(mut self, node: u32, slot: u32, object: u32) -> Self {
        self.heap.points_to(local(node, slot), ObjectId(object));
        self
    }

    pub fn field(mut self, owner: u32, name: &str, target: u32) -> Self {
        self.heap.field(ObjectId(owner), name, ObjectId(target));
        self
    }

    pub fn array_element(mut self, owner: u32, target: u32) -> Self {
        self.heap.array_element(ObjectId(owner), ObjectId(target));
        self
    }

    /// Add a site and the references live right after it
    pub fn site(mut self, site: TransferringSite, live_after: Vec<AbstractReference>) -> Self {
        self.local_liveness.add(site.clone(), live_after);
        self.classifier.add_site(site);
        self
    }

    pub fn live_after_node(mut self, node: u32, references: Vec<AbstractReference>) -> Self {
        self.global_liveness.add(NodeId(node), references);
        self
    }

    pub fn build(self) -> ProgramCollaborators {
        ProgramCollaborators {
            template: self.template,
            oracle: StaticPointerAnalysis::new(self.call_graph, self.heap.build()),
            classifier: self.classifier,
            local_liveness: self.local_liveness,
            global_liveness: self.global_liveness,
        }
    }
}

pub fn verify(program: &mut ProgramCollaborators) -> ResultsIndex {
    verify_with(VerifierConfig::default().sequential(), program)
}

pub fn verify_with(config: VerifierConfig, program: &mut ProgramCollaborators) -> ResultsIndex {
    let pipeline = TransferSafetyPipeline::new(config).expect("valid config");
    pipeline.run_program(program).expect("collaborators perform")
}
