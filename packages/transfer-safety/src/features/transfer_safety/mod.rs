//! # Ownership-Transfer Safety
//!
//! Proves, per transfer slot, that nothing handed across a capsule boundary is
//! still reachable from the sender's live state:
//!
//! ```text
//! live_refs    = live_after(site) ∪ live_after(enclosing node)
//! live_objects = ⋃ closure(r)  for r in live_refs
//! escaped(s)   = closure(reference_for(node, s))
//! SAFE(s)      ⇔ escaped(s) ∩ live_objects = ∅
//! ```
//!
//! ## Architecture
//! - **Domain**: TransferSafety, TransferSiteResult, CapsuleTemplate
//! - **Application**: OwnershipTransferVerifier (two phases), ResultsIndex, TransferReport
//!
//! Liveness is over-approximated on purpose: an unprovable transfer is
//! rejected rather than silently permitted.

pub mod application;
pub mod domain;

pub use application::report::{TransferEntry, TransferReport, TransferSiteReport};
pub use application::results_index::{ResultsIndex, VerificationStats};
pub use application::verifier::{Collaborators, OwnershipTransferVerifier};
pub use domain::{CapsuleTemplate, TransferOutcome, TransferSafety, TransferSiteResult};
