//! Pipeline orchestration
//!
//! - `context`: explicit run context (worker pool + closure cache)
//! - `program_model`: JSON description of a completed static model
//! - `transfer_pipeline`: performs collaborators, then verifies

pub mod context;
pub mod program_model;
pub mod transfer_pipeline;

pub use context::AnalysisContext;
pub use program_model::{ProgramCollaborators, ProgramModel};
pub use transfer_pipeline::TransferSafetyPipeline;

pub use crate::features::transfer_safety::Collaborators;
