//! Transfer safety use cases

pub mod report;
pub mod results_index;
pub mod verifier;

pub use report::TransferReport;
pub use results_index::ResultsIndex;
pub use verifier::{Collaborators, OwnershipTransferVerifier};
