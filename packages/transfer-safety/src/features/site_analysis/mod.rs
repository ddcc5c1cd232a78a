//! # Transferring-Site Classification Boundary
//!
//! A transferring site is a program point where references cross a capsule
//! boundary: arguments of an invocation on another capsule, or the value a
//! capsule procedure returns to its caller. Which points qualify is decided
//! by a [`SiteClassifier`]; the verifier only consumes its answers.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::transferring_site::{SiteKind, TransferringSite};
pub use infrastructure::TableSiteClassifier;
pub use ports::SiteClassifier;
