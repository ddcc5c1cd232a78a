//! Diagnostic report
//!
//! Nested document, one record per transferring site:
//!
//! ```text
//! {
//!   "capsuleTemplate": "org/demo/Master",
//!   "transferSites": [
//!     {
//!       "transferringSite": { "node": {..}, "kind": "invocation", .. },
//!       "liveVariables": ["n0:v3"],
//!       "liveObjects": ["alloc:12:Buffer"],
//!       "transfers": [
//!         { "transferID": 2, "escapedObjects": ["alloc:12:Buffer"], "isSafeTransfer": false }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Field names and nesting are stable; byte layout is not.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::features::site_analysis::domain::TransferringSite;
use crate::features::transfer_safety::domain::{CapsuleTemplate, TransferSiteResult};
use crate::shared::models::{ObjectId, Slot};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReport {
    pub capsule_template: String,
    pub transfer_sites: Vec<TransferSiteReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSiteReport {
    pub transferring_site: TransferringSite,
    pub live_variables: Vec<String>,
    pub live_objects: Vec<String>,
    pub transfers: Vec<TransferEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEntry {
    #[serde(rename = "transferID")]
    pub transfer_id: Slot,
    pub escaped_objects: Vec<String>,
    pub is_safe_transfer: bool,
}

impl TransferReport {
    pub(crate) fn build(
        template: &CapsuleTemplate,
        results: &BTreeMap<TransferringSite, TransferSiteResult>,
        labels: &FxHashMap<ObjectId, String>,
    ) -> Self {
        let label = |objects: &BTreeSet<ObjectId>| -> Vec<String> {
            objects
                .iter()
                .map(|id| labels.get(id).cloned().unwrap_or_else(|| id.to_string()))
                .collect()
        };

        let transfer_sites = results
            .iter()
            .map(|(site, result)| TransferSiteReport {
                transferring_site: site.clone(),
                live_variables: result.live_references().iter().map(|r| r.to_string()).collect(),
                live_objects: label(result.live_objects()),
                transfers: result
                    .transfers()
                    .map(|(slot, outcome)| TransferEntry {
                        transfer_id: slot,
                        escaped_objects: label(&outcome.escaped),
                        is_safe_transfer: outcome.safety.is_safe(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            capsule_template: template.qualified_name().to_string(),
            transfer_sites,
        }
    }

    /// Number of transfers reported UNSAFE
    pub fn unsafe_transfer_count(&self) -> usize {
        self.transfer_sites
            .iter()
            .flat_map(|site| site.transfers.iter())
            .filter(|t| !t.is_safe_transfer)
            .count()
    }
}
