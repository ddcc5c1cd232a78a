//! Domain models for transfer safety

pub mod capsule;
pub mod safety;
pub mod site_result;

pub use capsule::CapsuleTemplate;
pub use safety::TransferSafety;
pub use site_result::{TransferOutcome, TransferSiteResult};
