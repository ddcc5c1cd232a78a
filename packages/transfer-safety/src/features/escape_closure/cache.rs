//! Run-scoped closure cache
//!
//! Keyed by abstract reference identity. The cache remembers the generation
//! of the heap graph its entries were computed against and empties itself the
//! first time it sees a different generation. One cache serves one heap graph
//! at a time.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use super::closure::{points_to_closure, ObjectSet};
use crate::features::points_to::domain::{AbstractReference, HeapGraph};

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
    pub invalidations: usize,
}

/// Concurrent memo table: reference → closure
#[derive(Debug)]
pub struct ClosureCache {
    entries: DashMap<AbstractReference, Arc<ObjectSet>, FxBuildHasher>,
    generation: AtomicU64,
    max_entries: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    invalidations: AtomicUsize,
}

impl ClosureCache {
    /// Cache admitting at most `max_entries` closures
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            generation: AtomicU64::new(0),
            max_entries,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            invalidations: AtomicUsize::new(0),
        }
    }

    /// Cached closure of `reference`, computing it on a miss
    pub fn get_or_compute(&self, heap: &HeapGraph, reference: &AbstractReference) -> Arc<ObjectSet> {
        self.sync_generation(heap.generation());

        if let Some(hit) = self.entries.get(reference) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit.value());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let closure = Arc::new(points_to_closure(reference, heap));
        if self.entries.len() < self.max_entries {
            self.entries.insert(reference.clone(), Arc::clone(&closure));
        }
        closure
    }

    fn sync_generation(&self, generation: u64) {
        let seen = self.generation.load(Ordering::Acquire);
        if seen == generation {
            return;
        }
        if self
            .generation
            .compare_exchange(seen, generation, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.entries.clear();
            if seen != 0 {
                self.invalidations.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Drop every entry
    pub fn invalidate(&self) {
        self.entries.clear();
        self.generation.store(0, Ordering::Release);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

impl Default for ClosureCache {
    fn default() -> Self {
        Self::new(1_000_000)
    }
}
