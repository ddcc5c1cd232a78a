//! Error types for transfer-safety
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::{NodeId, Slot};

/// Main error type for transfer-safety operations
#[derive(Debug, Error)]
pub enum TransferError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A collaborating analysis could not complete
    #[error("Collaborator '{analysis}' failed: {reason}")]
    Collaborator { analysis: String, reason: String },

    /// A model refers to a call-graph node that does not exist
    #[error("Unknown call-graph node: {0}")]
    UnknownNode(NodeId),

    /// A verdict was requested for a site or slot that was never analyzed
    #[error("Transfer {slot} at {site} was never analyzed")]
    NotAnalyzed { site: String, slot: Slot },
}

impl TransferError {
    /// Create a collaborator failure
    pub fn collaborator(analysis: impl Into<String>, reason: impl Into<String>) -> Self {
        TransferError::Collaborator {
            analysis: analysis.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for transfer-safety operations
pub type Result<T> = std::result::Result<T, TransferError>;
