//! Results Index
//!
//! Immutable home of the frozen verifier output. The diagnostic report is
//! computed on first request and cached; later requests return the same value.

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};

use super::report::TransferReport;
use crate::errors::{Result, TransferError};
use crate::features::site_analysis::domain::TransferringSite;
use crate::features::transfer_safety::domain::{CapsuleTemplate, TransferSafety, TransferSiteResult};
use crate::shared::models::{MethodId, ObjectId, Slot};

/// Verification counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationStats {
    pub nodes: usize,
    pub sites: usize,
    pub transfers: usize,
    pub unsafe_transfers: usize,
    pub unsafe_methods: usize,
    pub elapsed_ms: u64,
}

/// Frozen verdicts for one capsule template
#[derive(Debug)]
pub struct ResultsIndex {
    template: CapsuleTemplate,
    results: BTreeMap<TransferringSite, TransferSiteResult>,
    unsafe_sites: BTreeMap<MethodId, BTreeSet<TransferringSite>>,
    object_labels: FxHashMap<ObjectId, String>,
    stats: VerificationStats,
    report: OnceCell<TransferReport>,
}

impl ResultsIndex {
    pub(crate) fn new(
        template: CapsuleTemplate,
        results: BTreeMap<TransferringSite, TransferSiteResult>,
        unsafe_sites: BTreeMap<MethodId, BTreeSet<TransferringSite>>,
        object_labels: FxHashMap<ObjectId, String>,
        stats: VerificationStats,
    ) -> Self {
        Self {
            template,
            results,
            unsafe_sites,
            object_labels,
            stats,
            report: OnceCell::new(),
        }
    }

    #[inline]
    pub fn template(&self) -> &CapsuleTemplate {
        &self.template
    }

    #[inline]
    pub fn stats(&self) -> &VerificationStats {
        &self.stats
    }

    /// Verdict of one transfer slot
    ///
    /// Fails with [`TransferError::NotAnalyzed`] when the site or the slot was
    /// never part of the analysis.
    pub fn verdict(&self, site: &TransferringSite, slot: Slot) -> Result<TransferSafety> {
        self.results
            .get(site)
            .and_then(|result| result.safety(slot))
            .ok_or_else(|| TransferError::NotAnalyzed {
                site: site.to_string(),
                slot,
            })
    }

    pub fn is_safe_transfer(&self, site: &TransferringSite, slot: Slot) -> Result<bool> {
        Ok(self.verdict(site, slot)?.is_safe())
    }

    #[inline]
    pub fn result(&self, site: &TransferringSite) -> Option<&TransferSiteResult> {
        self.results.get(site)
    }

    pub fn results(&self) -> impl Iterator<Item = (&TransferringSite, &TransferSiteResult)> + '_ {
        self.results.iter()
    }

    /// Methods with unsafe sites; each site carries only its unsafe transfers
    #[inline]
    pub fn unsafe_sites_by_method(&self) -> &BTreeMap<MethodId, BTreeSet<TransferringSite>> {
        &self.unsafe_sites
    }

    #[inline]
    pub fn unsafe_sites_for(&self, method: &MethodId) -> Option<&BTreeSet<TransferringSite>> {
        self.unsafe_sites.get(method)
    }

    #[inline]
    pub fn has_unsafe_transfers(&self) -> bool {
        !self.unsafe_sites.is_empty()
    }

    /// Number of analyzed sites
    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Diagnostic report (computed once)
    pub fn report(&self) -> &TransferReport {
        self.report.get_or_init(|| {
            TransferReport::build(&self.template, &self.results, &self.object_labels)
        })
    }

    /// Diagnostic report as JSON text
    pub fn report_json(&self, pretty: bool) -> Result<String> {
        let report = self.report();
        let json = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    /// File name for the JSON report log
    pub fn log_file_name(&self) -> String {
        self.template.log_file_name()
    }
}
