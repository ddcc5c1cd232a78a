//! Infrastructure implementations of the points-to boundary

pub mod static_oracle;

pub use static_oracle::StaticPointerAnalysis;
