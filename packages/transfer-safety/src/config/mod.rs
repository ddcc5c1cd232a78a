//! Verifier Configuration
//!
//! One YAML-loadable document with three sections:
//! - `parallel`: Phase 1 worker pool
//! - `closure`: escape-closure memoization
//! - `report`: diagnostic report rendering
//!
//! # Examples
//!
//! ```rust,ignore
//! use transfer_safety::config::VerifierConfig;
//!
//! let config = VerifierConfig::default().sequential();
//! config.validate()?;
//!
//! let config = VerifierConfig::from_yaml("verifier.yaml")?;
//! ```

pub mod error;
pub mod verifier_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use verifier_config::{ClosureConfig, ParallelConfig, ReportConfig, VerifierConfig};
