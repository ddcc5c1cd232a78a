//! Feature slices
//!
//! Leaves first: points_to, site_analysis, liveness → escape_closure → transfer_safety

pub mod escape_closure;
pub mod liveness;
pub mod points_to;
pub mod site_analysis;
pub mod transfer_safety;
