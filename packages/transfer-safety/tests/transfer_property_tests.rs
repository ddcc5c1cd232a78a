//! Property-based tests for transfer verification
//!
//! Invariants that hold for ALL generated heaps:
//! - Disjointness: a slot is SAFE iff its escape closure misses every live object
//! - Union: live objects cover both the site's and the node's liveness answers
//! - Monotonicity: more live state never turns UNSAFE into SAFE
//! - Aggregation: filed sites carry exactly the UNSAFE slots

mod common;

use common::*;
use proptest::prelude::*;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::collections::{BTreeSet, VecDeque};
use transfer_safety::{
    AbstractReference, CallGraphNode, MethodId, NodeId, ObjectId, ResultsIndex, Slot,
    TransferSafety, TransferringSite,
};

const METHOD: &str = "Master.run()V";
const TRANSFER_SLOTS: [u32; 3] = [0, 1, 2];

/// Random heap over `objects` objects plus one site at node 1
#[derive(Debug, Clone)]
struct HeapShape {
    objects: u32,
    edges: Vec<(u32, u32)>,
    transfer_targets: Vec<(u32, u32)>,
    site_live: Vec<(u32, u32)>,
    node_live: Vec<(u32, u32)>,
}

fn heap_shape() -> impl Strategy<Value = HeapShape> {
    (2u32..12).prop_flat_map(|objects| {
        let edge = (0..objects, 0..objects);
        let slot_target = (0u32..3, 0..objects);
        let live_target = (10u32..14, 0..objects);
        (
            prop::collection::vec(edge, 0..20),
            prop::collection::vec(slot_target, 0..6),
            prop::collection::vec(live_target.clone(), 0..4),
            prop::collection::vec(live_target, 0..4),
        )
            .prop_map(move |(edges, transfer_targets, site_live, node_live)| HeapShape {
                objects,
                edges,
                transfer_targets,
                site_live,
                node_live,
            })
    })
}

impl HeapShape {
    fn site(&self) -> TransferringSite {
        TransferringSite::invocation(
            CallGraphNode::new(NodeId(1), METHOD),
            "Worker.take()V",
            5,
            TRANSFER_SLOTS.iter().map(|&s| Slot(s)),
        )
    }

    fn live_refs(targets: &[(u32, u32)]) -> Vec<AbstractReference> {
        targets.iter().map(|&(slot, _)| local(1, slot)).collect()
    }

    fn verify(&self) -> ResultsIndex {
        let mut builder = ProgramBuilder::new().node(1, METHOD);
        for id in 0..self.objects {
            builder = builder.object(id);
        }
        for &(from, to) in &self.edges {
            builder = builder.field(from, "f", to);
        }
        for &(slot, target) in self
            .transfer_targets
            .iter()
            .chain(&self.site_live)
            .chain(&self.node_live)
        {
            builder = builder.points_to(1, slot, target);
        }
        let mut program = builder
            .site(self.site(), Self::live_refs(&self.site_live))
            .live_after_node(1, Self::live_refs(&self.node_live))
            .build();
        verify(&mut program)
    }

    /// Independent breadth-first closure from a local slot
    fn reachable_from(&self, slots: &BTreeSet<u32>) -> BTreeSet<u32> {
        let all_targets = self
            .transfer_targets
            .iter()
            .chain(&self.site_live)
            .chain(&self.node_live);
        let mut seen: BTreeSet<u32> = all_targets
            .filter(|(slot, _)| slots.contains(slot))
            .map(|&(_, target)| target)
            .collect();
        let mut queue: VecDeque<u32> = seen.iter().copied().collect();
        while let Some(obj) = queue.pop_front() {
            for &(from, to) in &self.edges {
                if from == obj && seen.insert(to) {
                    queue.push_back(to);
                }
            }
        }
        seen
    }

    fn live_slots(&self) -> BTreeSet<u32> {
        self.site_live
            .iter()
            .chain(&self.node_live)
            .map(|&(slot, _)| slot)
            .collect()
    }
}

fn ids(set: &BTreeSet<u32>) -> BTreeSet<ObjectId> {
    set.iter().map(|&id| ObjectId(id)).collect()
}

// ============================================================================
// Proptest
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_safe_iff_disjoint(shape in heap_shape()) {
        let index = shape.verify();
        let site = shape.site();
        let live = shape.reachable_from(&shape.live_slots());

        for slot in TRANSFER_SLOTS {
            let escaped = shape.reachable_from(&BTreeSet::from([slot]));
            let expected = if escaped.is_disjoint(&live) {
                TransferSafety::Safe
            } else {
                TransferSafety::Unsafe
            };
            prop_assert_eq!(index.verdict(&site, Slot(slot)).unwrap(), expected);
            prop_assert_eq!(index.result(&site).unwrap().escaped(Slot(slot)).unwrap(), &ids(&escaped));
        }
    }

    #[test]
    fn prop_live_objects_union_both_liveness(shape in heap_shape()) {
        let index = shape.verify();
        let result = index.result(&shape.site()).unwrap();

        let site_slots: BTreeSet<u32> = shape.site_live.iter().map(|&(s, _)| s).collect();
        let node_slots: BTreeSet<u32> = shape.node_live.iter().map(|&(s, _)| s).collect();
        let expected: BTreeSet<u32> = shape
            .reachable_from(&site_slots)
            .union(&shape.reachable_from(&node_slots))
            .copied()
            .collect();

        prop_assert_eq!(result.live_objects(), &ids(&expected));
        for r in HeapShape::live_refs(&shape.site_live).iter().chain(&HeapShape::live_refs(&shape.node_live)) {
            prop_assert!(result.live_references().contains(r));
        }
    }

    #[test]
    fn prop_more_liveness_never_helps(shape in heap_shape(), extra in (10u32..14, 0u32..12)) {
        let before = shape.verify();
        let mut grown = shape.clone();
        grown.node_live.push((extra.0, extra.1 % shape.objects));
        let after = grown.verify();
        let site = shape.site();

        for slot in TRANSFER_SLOTS {
            if before.verdict(&site, Slot(slot)).unwrap().is_unsafe() {
                prop_assert!(after.verdict(&site, Slot(slot)).unwrap().is_unsafe());
            }
        }
    }

    #[test]
    fn prop_aggregation_matches_verdicts(shape in heap_shape()) {
        let index = shape.verify();
        let site = shape.site();
        let unsafe_slots: BTreeSet<Slot> = TRANSFER_SLOTS
            .iter()
            .map(|&s| Slot(s))
            .filter(|&s| index.verdict(&site, s).unwrap().is_unsafe())
            .collect();

        match index.unsafe_sites_for(&MethodId::from(METHOD)) {
            None => prop_assert!(unsafe_slots.is_empty()),
            Some(filed) => {
                prop_assert_eq!(filed.len(), 1);
                let filed = filed.iter().next().unwrap();
                prop_assert_eq!(filed.transfers(), &unsafe_slots);
                prop_assert_eq!(filed.node(), site.node());
            }
        }
        prop_assert_eq!(index.report().unsafe_transfer_count(), unsafe_slots.len());
    }

    #[test]
    fn prop_rerun_is_identical(shape in heap_shape()) {
        let first = shape.verify();
        let second = shape.verify();
        prop_assert_eq!(first.report(), second.report());
    }
}

// ============================================================================
// QuickCheck
// ============================================================================

#[quickcheck]
fn qc_restriction_is_intersection(transfers: Vec<u8>, keep: Vec<u8>) -> TestResult {
    if transfers.is_empty() {
        return TestResult::discard();
    }
    let node = CallGraphNode::new(NodeId(3), METHOD);
    let site = TransferringSite::invocation(node, "Worker.take()V", 1, transfers.iter().map(|&s| Slot(s as u32)));
    let keep: BTreeSet<Slot> = keep.iter().map(|&s| Slot(s as u32)).collect();

    let restricted = site.restricted_to(&keep);
    let expected: BTreeSet<Slot> = site.transfers().intersection(&keep).copied().collect();

    TestResult::from_bool(
        restricted.transfers() == &expected && restricted.node() == site.node() && restricted.kind() == site.kind(),
    )
}

#[quickcheck]
fn qc_safety_from_disjointness(disjoint: bool) -> bool {
    let safety = TransferSafety::from_disjointness(disjoint);
    safety.is_known() && safety.is_safe() == disjoint && safety.is_unsafe() != disjoint
}
