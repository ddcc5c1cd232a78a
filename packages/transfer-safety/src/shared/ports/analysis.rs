//! Analysis lifecycle
//!
//! Every collaborator the verifier consumes is itself an analysis that must be
//! performed before its answers mean anything. The verifier only reads
//! collaborators for which `has_been_performed()` holds.

use crate::errors::Result;

/// A whole-program analysis with a one-shot `perform` step
pub trait Analysis {
    /// Short name used in logs and collaborator errors
    fn name(&self) -> &'static str;

    /// Run the analysis. Performing an already-performed analysis is a no-op.
    fn perform(&mut self) -> Result<()>;

    /// Whether `perform` has completed successfully
    fn has_been_performed(&self) -> bool;
}
