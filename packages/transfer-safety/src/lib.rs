/*
 * Transfer Safety - Ownership-Transfer Verifier for Capsules
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common ids and the analysis lifecycle
 * - features/    : Vertical slices (points_to → site_analysis → liveness → escape_closure → transfer_safety)
 * - pipeline/    : Context object, program model, driver
 * - config/      : Verifier configuration
 *
 * A transfer is SAFE when nothing it hands across a capsule boundary is still
 * reachable from the sending capsule's live state.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared ids and ports
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::VerifierConfig;
pub use errors::{Result, TransferError};
pub use features::escape_closure::{points_to_closure, ClosureCache, EscapeClosureComputer, ObjectSet};
pub use features::points_to::{
    AbstractObject, AbstractReference, CallGraph, CallGraphNode, HeapGraph, HeapGraphBuilder,
    PointerAnalysisOracle, StaticPointerAnalysis,
};
pub use features::site_analysis::{SiteClassifier, SiteKind, TableSiteClassifier, TransferringSite};
pub use features::liveness::{
    CallGraphLiveness, TableCallGraphLiveness, TableTransferLiveness, TransferLiveness,
};
pub use features::transfer_safety::{
    CapsuleTemplate, OwnershipTransferVerifier, ResultsIndex, TransferReport, TransferSafety,
    TransferSiteResult,
};
pub use pipeline::{
    AnalysisContext, Collaborators, ProgramCollaborators, ProgramModel, TransferSafetyPipeline,
};
pub use shared::models::{MethodId, NodeId, ObjectId, Slot};
pub use shared::ports::Analysis;
