//! Per-slot transfer safety
//!
//! One three-state value per slot: a slot cannot be SAFE and UNSAFE at once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict for one transfer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferSafety {
    /// Not evaluated yet
    #[default]
    Unknown,

    /// Escaped objects are disjoint from live objects
    Safe,

    /// Some escaped object is still live after the transfer
    Unsafe,
}

impl TransferSafety {
    /// Verdict from the disjointness predicate
    #[inline]
    pub fn from_disjointness(disjoint: bool) -> Self {
        if disjoint {
            TransferSafety::Safe
        } else {
            TransferSafety::Unsafe
        }
    }

    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, TransferSafety::Safe)
    }

    #[inline]
    pub fn is_unsafe(&self) -> bool {
        matches!(self, TransferSafety::Unsafe)
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, TransferSafety::Unknown)
    }
}

impl fmt::Display for TransferSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferSafety::Unknown => "UNKNOWN",
            TransferSafety::Safe => "SAFE",
            TransferSafety::Unsafe => "UNSAFE",
        };
        f.pad(s)
    }
}
