//! Table-backed liveness analyses
//!
//! Both tables answer with the empty set for sites and nodes they hold no
//! entry for.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

use crate::errors::Result;
use crate::features::liveness::ports::{CallGraphLiveness, TransferLiveness};
use crate::features::points_to::domain::{AbstractReference, CallGraphNode};
use crate::features::site_analysis::domain::TransferringSite;
use crate::shared::models::NodeId;
use crate::shared::ports::Analysis;

/// Live references after each transferring site
#[derive(Debug, Clone, Default)]
pub struct TableTransferLiveness {
    live: FxHashMap<TransferringSite, BTreeSet<AbstractReference>>,
    performed: bool,
}

impl TableTransferLiveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add live references after `site` (accumulates)
    pub fn add(
        &mut self,
        site: TransferringSite,
        references: impl IntoIterator<Item = AbstractReference>,
    ) -> &mut Self {
        self.live.entry(site).or_default().extend(references);
        self.performed = false;
        self
    }
}

impl Analysis for TableTransferLiveness {
    fn name(&self) -> &'static str {
        "transfer-liveness"
    }

    fn perform(&mut self) -> Result<()> {
        self.performed = true;
        Ok(())
    }

    fn has_been_performed(&self) -> bool {
        self.performed
    }
}

impl TransferLiveness for TableTransferLiveness {
    fn live_after_site(&self, site: &TransferringSite) -> BTreeSet<AbstractReference> {
        self.live.get(site).cloned().unwrap_or_default()
    }
}

/// Live references after each call-graph node returns
#[derive(Debug, Clone, Default)]
pub struct TableCallGraphLiveness {
    live: FxHashMap<NodeId, BTreeSet<AbstractReference>>,
    performed: bool,
}

impl TableCallGraphLiveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add live references after `node` returns (accumulates)
    pub fn add(
        &mut self,
        node: NodeId,
        references: impl IntoIterator<Item = AbstractReference>,
    ) -> &mut Self {
        self.live.entry(node).or_default().extend(references);
        self.performed = false;
        self
    }
}

impl Analysis for TableCallGraphLiveness {
    fn name(&self) -> &'static str {
        "call-graph-liveness"
    }

    fn perform(&mut self) -> Result<()> {
        self.performed = true;
        Ok(())
    }

    fn has_been_performed(&self) -> bool {
        self.performed
    }
}

impl CallGraphLiveness for TableCallGraphLiveness {
    fn live_after_node(&self, node: &CallGraphNode) -> BTreeSet<AbstractReference> {
        self.live.get(&node.id).cloned().unwrap_or_default()
    }
}
