//! # Escape Closure
//!
//! The escape closure of a reference is every abstract object transitively
//! reachable from the objects it points to, following field and array edges
//! of the heap graph to fixpoint.
//!
//! Closures dominate the verifier's cost (one per live reference per site and
//! one per transfer slot), so [`EscapeClosureComputer`] can share a run-scoped
//! [`ClosureCache`] keyed by reference and stamped with the heap generation.

pub mod cache;
pub mod closure;

pub use cache::{CacheStats, ClosureCache};
pub use closure::{points_to_closure, EscapeClosureComputer, ObjectSet};
