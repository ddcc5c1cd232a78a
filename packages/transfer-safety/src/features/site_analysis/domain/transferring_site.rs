//! Transferring Site
//!
//! A site is identified by its enclosing call-graph node, its kind and its
//! transfer slots. Two structurally identical sites in different nodes are
//! different sites. Sites are values: restricting a site to a subset of its
//! transfers builds a new site and leaves the original untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::features::points_to::domain::CallGraphNode;
use crate::shared::models::{MethodId, Slot};

/// Closed set of transferring-site kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SiteKind {
    /// Invocation of a procedure on another capsule; transfers are argument slots
    Invocation { callee: MethodId, instruction: u32 },

    /// Return from a capsule procedure; the transfer is the returned value slot
    Return { instruction: u32 },
}

impl SiteKind {
    #[inline]
    pub fn instruction(&self) -> u32 {
        match self {
            SiteKind::Invocation { instruction, .. } | SiteKind::Return { instruction } => {
                *instruction
            }
        }
    }
}

/// Program point handing references across a capsule boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferringSite {
    node: CallGraphNode,
    #[serde(flatten)]
    kind: SiteKind,
    transfers: BTreeSet<Slot>,
}

impl TransferringSite {
    pub fn new(node: CallGraphNode, kind: SiteKind, transfers: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            node,
            kind,
            transfers: transfers.into_iter().collect(),
        }
    }

    /// Invocation site transferring the given argument slots
    pub fn invocation(
        node: CallGraphNode,
        callee: impl Into<MethodId>,
        instruction: u32,
        transfers: impl IntoIterator<Item = Slot>,
    ) -> Self {
        Self::new(
            node,
            SiteKind::Invocation {
                callee: callee.into(),
                instruction,
            },
            transfers,
        )
    }

    /// Return site transferring the returned value slot
    pub fn returning(node: CallGraphNode, instruction: u32, value: Slot) -> Self {
        Self::new(node, SiteKind::Return { instruction }, [value])
    }

    #[inline]
    pub fn node(&self) -> &CallGraphNode {
        &self.node
    }

    /// Enclosing method
    #[inline]
    pub fn method(&self) -> &MethodId {
        &self.node.method
    }

    #[inline]
    pub fn kind(&self) -> &SiteKind {
        &self.kind
    }

    #[inline]
    pub fn transfers(&self) -> &BTreeSet<Slot> {
        &self.transfers
    }

    #[inline]
    pub fn has_transfer(&self, slot: Slot) -> bool {
        self.transfers.contains(&slot)
    }

    /// Copy of this site carrying only the given transfers (slots it doesn't have are ignored)
    pub fn restricted_to(&self, slots: &BTreeSet<Slot>) -> Self {
        Self {
            node: self.node.clone(),
            kind: self.kind.clone(),
            transfers: self.transfers.intersection(slots).copied().collect(),
        }
    }
}

impl fmt::Display for TransferringSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SiteKind::Invocation {
                callee,
                instruction,
            } => write!(f, "{}@{} invoke {}", self.node, instruction, callee)?,
            SiteKind::Return { instruction } => write!(f, "{}@{} return", self.node, instruction)?,
        }
        let slots: Vec<String> = self.transfers.iter().map(|s| s.to_string()).collect();
        write!(f, " {{{}}}", slots.join(","))
    }
}
