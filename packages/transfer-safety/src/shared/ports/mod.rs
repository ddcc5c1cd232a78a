//! Shared ports

pub mod analysis;

pub use analysis::Analysis;
