//! Table-backed site classifier
//!
//! Sites are registered up front; `perform` groups them by node and drops
//! duplicates so every site is reported exactly once.

use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::features::points_to::domain::CallGraphNode;
use crate::features::site_analysis::domain::TransferringSite;
use crate::features::site_analysis::ports::SiteClassifier;
use crate::shared::models::NodeId;
use crate::shared::ports::Analysis;

#[derive(Debug, Clone, Default)]
pub struct TableSiteClassifier {
    pending: Vec<TransferringSite>,
    nodes: Vec<CallGraphNode>,
    sites: FxHashMap<NodeId, Vec<TransferringSite>>,
    performed: bool,
}

impl TableSiteClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sites(sites: impl IntoIterator<Item = TransferringSite>) -> Self {
        let mut classifier = Self::new();
        for site in sites {
            classifier.add_site(site);
        }
        classifier
    }

    /// Register a site. Invalidates a previous `perform`.
    pub fn add_site(&mut self, site: TransferringSite) -> &mut Self {
        self.pending.push(site);
        self.performed = false;
        self
    }

    /// Number of distinct sites, registered or already grouped
    pub fn site_count(&self) -> usize {
        self.pending
            .iter()
            .chain(self.sites.values().flatten())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl Analysis for TableSiteClassifier {
    fn name(&self) -> &'static str {
        "site-classifier"
    }

    fn perform(&mut self) -> Result<()> {
        if self.performed {
            return Ok(());
        }

        let mut grouped: BTreeMap<CallGraphNode, BTreeSet<TransferringSite>> = BTreeMap::new();
        for site in self.pending.iter().chain(self.sites.values().flatten()) {
            let node_sites = grouped.entry(site.node().clone()).or_default();
            if !node_sites.insert(site.clone()) {
                warn!("duplicate transferring site dropped: {}", site);
            }
        }
        self.pending.clear();

        self.nodes = grouped.keys().cloned().collect();
        self.sites = grouped
            .into_iter()
            .map(|(node, sites)| (node.id, sites.into_iter().collect()))
            .collect();

        debug!(
            "site classifier ready: {} nodes, {} sites",
            self.nodes.len(),
            self.site_count()
        );
        self.performed = true;
        Ok(())
    }

    fn has_been_performed(&self) -> bool {
        self.performed
    }
}

impl SiteClassifier for TableSiteClassifier {
    fn transferring_nodes(&self) -> Vec<CallGraphNode> {
        self.nodes.clone()
    }

    fn transferring_sites(&self, node: &CallGraphNode) -> &[TransferringSite] {
        self.sites.get(&node.id).map(Vec::as_slice).unwrap_or(&[])
    }
}
