//! Ports (Interfaces) for the liveness analyses

use std::collections::BTreeSet;

use crate::features::points_to::domain::{AbstractReference, CallGraphNode};
use crate::features::site_analysis::domain::TransferringSite;
use crate::shared::ports::Analysis;

/// Intraprocedural liveness at transferring sites
pub trait TransferLiveness: Analysis + Send + Sync {
    /// References live immediately after `site`
    fn live_after_site(&self, site: &TransferringSite) -> BTreeSet<AbstractReference>;
}

/// Whole-call-graph liveness
pub trait CallGraphLiveness: Analysis + Send + Sync {
    /// References live anywhere after `node` returns to its callers
    fn live_after_node(&self, node: &CallGraphNode) -> BTreeSet<AbstractReference>;
}
