//! Analysis Context
//!
//! Everything a verification run shares lives here instead of in process
//! globals: the configuration, the Phase 1 worker pool and the run-scoped
//! closure cache. `init` sets them up, `teardown` reports and releases them.

use tracing::info;

use crate::config::VerifierConfig;
use crate::errors::Result;
use crate::features::escape_closure::{CacheStats, ClosureCache, EscapeClosureComputer};
use crate::features::points_to::domain::HeapGraph;

pub struct AnalysisContext {
    config: VerifierConfig,
    pool: Option<rayon::ThreadPool>,
    closure_cache: Option<ClosureCache>,
}

impl std::fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("config", &self.config)
            .field("threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .field("cached_closures", &self.closure_cache.as_ref().map(ClosureCache::len))
            .finish()
    }
}

impl AnalysisContext {
    /// Validate the configuration and set up the run's shared resources
    pub fn init(config: VerifierConfig) -> Result<Self> {
        config.validate()?;

        let pool = if config.parallel.enable_rayon {
            let threads = config.parallel.resolved_workers();
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("transfer-verify-{}", i))
                .build()?;
            info!("transfer verification pool: {} threads", threads);
            Some(pool)
        } else {
            None
        };

        let closure_cache = config
            .closure
            .memoize
            .then(|| ClosureCache::new(config.closure.max_cached));

        Ok(Self {
            config,
            pool,
            closure_cache,
        })
    }

    #[inline]
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Closure computer over `heap`, sharing the run cache when memoization is on
    pub fn closure_computer<'a>(&'a self, heap: &'a HeapGraph) -> EscapeClosureComputer<'a> {
        match self.closure_cache {
            Some(ref cache) => EscapeClosureComputer::with_cache(heap, cache),
            None => EscapeClosureComputer::new(heap),
        }
    }

    /// Whether `sites` sites are enough to go parallel
    #[inline]
    pub fn runs_parallel(&self, sites: usize) -> bool {
        self.pool.is_some() && sites >= self.config.parallel.min_sites
    }

    /// Run `f` inside the worker pool (or inline without one)
    pub fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match self.pool {
            Some(ref pool) => pool.install(f),
            None => f(),
        }
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.closure_cache.as_ref().map(ClosureCache::stats)
    }

    /// Report cache statistics and release the pool and cache
    pub fn teardown(self) {
        if let Some(stats) = self.cache_stats() {
            info!(
                "closure cache: {} hits, {} misses, {} entries, {} invalidations",
                stats.hits, stats.misses, stats.entries, stats.invalidations
            );
        }
    }
}
