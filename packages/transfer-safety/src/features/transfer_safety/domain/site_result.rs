//! Per-site analysis result
//!
//! Created with every transfer slot UNKNOWN and filled in by the verifier
//! during Phase 1. Frozen (read-only) once handed to the results index.

use std::collections::{BTreeMap, BTreeSet};

use super::safety::TransferSafety;
use crate::features::points_to::domain::AbstractReference;
use crate::features::site_analysis::domain::TransferringSite;
use crate::shared::models::{ObjectId, Slot};

/// Outcome for one transfer slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Transitive closure of the transferred reference
    pub escaped: BTreeSet<ObjectId>,
    pub safety: TransferSafety,
}

/// Everything the verifier derived for one transferring site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSiteResult {
    live_references: BTreeSet<AbstractReference>,
    live_objects: BTreeSet<ObjectId>,
    transfers: BTreeMap<Slot, TransferOutcome>,
}

impl TransferSiteResult {
    /// Result for `site` with every transfer slot still UNKNOWN
    pub fn new(
        site: &TransferringSite,
        live_references: BTreeSet<AbstractReference>,
        live_objects: BTreeSet<ObjectId>,
    ) -> Self {
        Self {
            live_references,
            live_objects,
            transfers: site
                .transfers()
                .iter()
                .map(|&slot| (slot, TransferOutcome::default()))
                .collect(),
        }
    }

    /// Record the outcome of one slot. Slots the site doesn't transfer are ignored.
    pub(crate) fn record(&mut self, slot: Slot, escaped: BTreeSet<ObjectId>, safety: TransferSafety) {
        if let Some(outcome) = self.transfers.get_mut(&slot) {
            outcome.escaped = escaped;
            outcome.safety = safety;
        }
    }

    #[inline]
    pub fn live_references(&self) -> &BTreeSet<AbstractReference> {
        &self.live_references
    }

    #[inline]
    pub fn live_objects(&self) -> &BTreeSet<ObjectId> {
        &self.live_objects
    }

    #[inline]
    pub fn outcome(&self, slot: Slot) -> Option<&TransferOutcome> {
        self.transfers.get(&slot)
    }

    #[inline]
    pub fn safety(&self, slot: Slot) -> Option<TransferSafety> {
        self.transfers.get(&slot).map(|o| o.safety)
    }

    #[inline]
    pub fn escaped(&self, slot: Slot) -> Option<&BTreeSet<ObjectId>> {
        self.transfers.get(&slot).map(|o| &o.escaped)
    }

    pub fn transfers(&self) -> impl Iterator<Item = (Slot, &TransferOutcome)> + '_ {
        self.transfers.iter().map(|(&slot, outcome)| (slot, outcome))
    }

    pub fn unsafe_transfers(&self) -> BTreeSet<Slot> {
        self.slots_where(TransferSafety::is_unsafe)
    }

    pub fn safe_transfers(&self) -> BTreeSet<Slot> {
        self.slots_where(TransferSafety::is_safe)
    }

    fn slots_where(&self, pred: impl Fn(&TransferSafety) -> bool) -> BTreeSet<Slot> {
        self.transfers
            .iter()
            .filter(|(_, outcome)| pred(&outcome.safety))
            .map(|(&slot, _)| slot)
            .collect()
    }

    pub fn has_unsafe_transfers(&self) -> bool {
        self.transfers.values().any(|o| o.safety.is_unsafe())
    }

    /// Every slot has a SAFE or UNSAFE verdict
    pub fn is_complete(&self) -> bool {
        self.transfers.values().all(|o| o.safety.is_known())
    }
}
