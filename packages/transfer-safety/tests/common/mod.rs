//! Common test utilities for transfer-safety
//!
//! Builders for small capsule programs and verification helpers shared by
//! the scenario, property and program-model tests.

#![allow(dead_code)]

mod builders;

pub use builders::*;
