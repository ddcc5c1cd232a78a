//! Ownership-Transfer Verifier
//!
//! Two-phase batch algorithm, run once per capsule template:
//!
//! 1. **Per-site verdicts**: for every transferring site, union the two
//!    liveness answers, close them over the heap graph, and test every
//!    transfer slot's escape closure for disjointness from the live objects.
//! 2. **Aggregation**: for every result with an UNSAFE slot, file a copy of
//!    the site restricted to its unsafe slots under the enclosing method.
//!
//! Phase 1 sites are independent of each other. With a parallel context they
//! are spread over the context's rayon pool and inserted into a sharded
//! `DashMap`; the map is frozen into a `BTreeMap` before Phase 2.

use dashmap::DashMap;
use rayon::prelude::*;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::results_index::{ResultsIndex, VerificationStats};
use crate::features::escape_closure::{EscapeClosureComputer, ObjectSet};
use crate::features::liveness::ports::{CallGraphLiveness, TransferLiveness};
use crate::features::points_to::ports::PointerAnalysisOracle;
use crate::features::site_analysis::domain::TransferringSite;
use crate::features::site_analysis::ports::SiteClassifier;
use crate::features::transfer_safety::domain::{CapsuleTemplate, TransferSafety, TransferSiteResult};
use crate::pipeline::context::AnalysisContext;
use crate::shared::models::{MethodId, ObjectId};

/// The four completed analyses the verifier reads from
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub oracle: &'a dyn PointerAnalysisOracle,
    pub classifier: &'a dyn SiteClassifier,
    pub local_liveness: &'a dyn TransferLiveness,
    pub global_liveness: &'a dyn CallGraphLiveness,
}

impl<'a> Collaborators<'a> {
    /// Names of collaborators that have not been performed
    pub fn unperformed(&self) -> Vec<&'static str> {
        let mut pending = Vec::new();
        if !self.oracle.has_been_performed() {
            pending.push(self.oracle.name());
        }
        if !self.classifier.has_been_performed() {
            pending.push(self.classifier.name());
        }
        if !self.local_liveness.has_been_performed() {
            pending.push(self.local_liveness.name());
        }
        if !self.global_liveness.has_been_performed() {
            pending.push(self.global_liveness.name());
        }
        pending
    }
}

type SiteResultMap = DashMap<TransferringSite, TransferSiteResult, FxBuildHasher>;

/// Verifier for one capsule template
pub struct OwnershipTransferVerifier<'a> {
    template: CapsuleTemplate,
    collaborators: Collaborators<'a>,
}

impl<'a> OwnershipTransferVerifier<'a> {
    pub fn new(template: CapsuleTemplate, collaborators: Collaborators<'a>) -> Self {
        Self {
            template,
            collaborators,
        }
    }

    /// Run both phases and freeze the results.
    ///
    /// # Panics
    /// When any collaborator has not been performed. Verdicts computed from
    /// partial collaborator state would be meaningless.
    pub fn verify(&self, ctx: &AnalysisContext) -> ResultsIndex {
        let pending = self.collaborators.unperformed();
        assert!(
            pending.is_empty(),
            "transfer verification of {} started before collaborators completed: {:?}",
            self.template,
            pending
        );

        let started = Instant::now();
        let heap = self.collaborators.oracle.heap_graph();
        let closures = ctx.closure_computer(heap);

        let results = self.build_transfer_site_results(ctx, &closures);
        let unsafe_sites = build_unsafe_transfers_map(&results);

        let mut object_labels: FxHashMap<ObjectId, String> = FxHashMap::default();
        for result in results.values() {
            let escaped = result.transfers().flat_map(|(_, o)| o.escaped.iter());
            for &id in result.live_objects().iter().chain(escaped) {
                object_labels
                    .entry(id)
                    .or_insert_with(|| heap.object_label(id));
            }
        }

        let stats = VerificationStats {
            nodes: results
                .keys()
                .map(|site| site.node().id)
                .collect::<BTreeSet<_>>()
                .len(),
            sites: results.len(),
            transfers: results.values().map(|r| r.transfers().count()).sum(),
            unsafe_transfers: results.values().map(|r| r.unsafe_transfers().len()).sum(),
            unsafe_methods: unsafe_sites.len(),
            elapsed_ms: elapsed_millis(started.elapsed()),
        };

        info!(
            "transfer verification of {}: {} sites, {} transfers, {} unsafe in {} methods ({}ms)",
            self.template,
            stats.sites,
            stats.transfers,
            stats.unsafe_transfers,
            stats.unsafe_methods,
            stats.elapsed_ms
        );

        ResultsIndex::new(self.template.clone(), results, unsafe_sites, object_labels, stats)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Phase 1: per-site verdicts
    // ═══════════════════════════════════════════════════════════════════════

    fn build_transfer_site_results(
        &self,
        ctx: &AnalysisContext,
        closures: &EscapeClosureComputer<'_>,
    ) -> BTreeMap<TransferringSite, TransferSiteResult> {
        let classifier = self.collaborators.classifier;
        let nodes = classifier.transferring_nodes();
        let sites: Vec<&TransferringSite> = nodes
            .iter()
            .flat_map(|node| classifier.transferring_sites(node))
            .collect();

        let results: SiteResultMap = DashMap::with_capacity_and_hasher(sites.len(), FxBuildHasher);
        let store = |site: &TransferringSite| {
            let result = self.analyze_site(site, closures);
            if results.insert(site.clone(), result).is_some() {
                warn!("transferring site reported twice: {}", site);
            }
        };

        if ctx.runs_parallel(sites.len()) {
            debug!("phase 1 over {} sites (parallel)", sites.len());
            for_each_parallel(ctx, &sites, &store);
        } else {
            debug!("phase 1 over {} sites", sites.len());
            sites.iter().for_each(|&site| store(site));
        }

        results.into_iter().collect()
    }

    fn analyze_site(
        &self,
        site: &TransferringSite,
        closures: &EscapeClosureComputer<'_>,
    ) -> TransferSiteResult {
        let node = site.node();

        let mut live_references = self.collaborators.local_liveness.live_after_site(site);
        live_references.extend(self.collaborators.global_liveness.live_after_node(node));

        let live_objects = closures.closure_of_all(&live_references);
        let mut result = TransferSiteResult::new(
            site,
            live_references,
            live_objects.iter().copied().collect(),
        );

        for &slot in site.transfers() {
            let reference = self.collaborators.oracle.reference_for(node, slot);
            let escaped = closures.closure(&reference);
            let safety = TransferSafety::from_disjointness(is_disjoint_from(&escaped, &live_objects));
            result.record(slot, escaped.iter().copied().collect(), safety);
        }

        debug!(
            "{}: {} live refs, {} live objects, unsafe {:?}",
            site,
            result.live_references().len(),
            result.live_objects().len(),
            result.unsafe_transfers()
        );
        result
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase 2: aggregation
// ═══════════════════════════════════════════════════════════════════════════

fn build_unsafe_transfers_map(
    results: &BTreeMap<TransferringSite, TransferSiteResult>,
) -> BTreeMap<MethodId, BTreeSet<TransferringSite>> {
    let mut unsafe_sites: BTreeMap<MethodId, BTreeSet<TransferringSite>> = BTreeMap::new();
    for (site, result) in results {
        if result.has_unsafe_transfers() {
            unsafe_sites
                .entry(site.method().clone())
                .or_default()
                .insert(site.restricted_to(&result.unsafe_transfers()));
        }
    }
    unsafe_sites
}

/// Stops at the first shared object
fn is_disjoint_from(escaped: &ObjectSet, live: &ObjectSet) -> bool {
    !escaped.iter().any(|obj| live.contains(obj))
}

fn for_each_parallel<F>(ctx: &AnalysisContext, sites: &[&TransferringSite], f: &F)
where
    F: Fn(&TransferringSite) + Sync,
{
    ctx.install(|| sites.par_iter().for_each(|&site| f(site)));
}

/// Saturates instead of wrapping
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
