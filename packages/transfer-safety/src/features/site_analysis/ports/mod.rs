//! Ports (Interfaces) for site classification

use crate::features::points_to::domain::CallGraphNode;
use crate::features::site_analysis::domain::TransferringSite;
use crate::shared::ports::Analysis;

/// Enumerates the call-graph nodes containing transferring sites
pub trait SiteClassifier: Analysis + Send + Sync {
    /// Nodes with at least one transferring site
    fn transferring_nodes(&self) -> Vec<CallGraphNode>;

    /// Transferring sites of a node (empty for nodes without sites)
    fn transferring_sites(&self, node: &CallGraphNode) -> &[TransferringSite];
}
