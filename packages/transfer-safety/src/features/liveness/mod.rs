//! # Liveness Boundary
//!
//! Two independent live-variable analyses feed the verifier:
//! - [`TransferLiveness`]: references live immediately after a transferring site
//! - [`CallGraphLiveness`]: references live anywhere after the enclosing node returns
//!
//! The verifier takes their union. Local liveness alone misses what a caller
//! may still read once the capsule procedure returns.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{TableCallGraphLiveness, TableTransferLiveness};
pub use ports::{CallGraphLiveness, TransferLiveness};
