//! Verifier configuration sections

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Complete verifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Phase 1 parallelism
    pub parallel: ParallelConfig,

    /// Escape-closure computation
    pub closure: ClosureConfig,

    /// Diagnostic report
    pub report: ReportConfig,
}

impl VerifierConfig {
    /// Load from a YAML file and validate it
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse from YAML text and validate it
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.parallel.validate()?;
        self.closure.validate()?;
        Ok(())
    }

    /// Builder: run Phase 1 on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel.enable_rayon = false;
        self
    }

    /// Builder: replace the parallel section
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builder: replace the closure section
    pub fn with_closure(mut self, closure: ClosureConfig) -> Self {
        self.closure = closure;
        self
    }

    /// Builder: replace the report section
    pub fn with_report(mut self, report: ReportConfig) -> Self {
        self.report = report;
        self
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Parallelism Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Enable Rayon parallel iteration over transferring sites
    pub enable_rayon: bool,

    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Minimum number of sites before Phase 1 goes parallel (1..=1000000)
    pub min_sites: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enable_rayon: true,
            num_workers: 0,
            min_sites: 64,
        }
    }
}

impl ParallelConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }

        if self.min_sites == 0 || self.min_sites > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "min_sites",
                self.min_sites,
                1,
                1_000_000,
                "Parallel threshold must be at least one site",
            ));
        }

        Ok(())
    }

    /// Builder: Set enable_rayon
    pub fn enable_rayon(mut self, v: bool) -> Self {
        self.enable_rayon = v;
        self
    }

    /// Builder: Set num_workers
    pub fn num_workers(mut self, v: usize) -> Self {
        self.num_workers = v;
        self
    }

    /// Builder: Set min_sites
    pub fn min_sites(mut self, v: usize) -> Self {
        self.min_sites = v;
        self
    }

    /// Worker count with 0 resolved to 75% of the available cores
    pub fn resolved_workers(&self) -> usize {
        if self.num_workers > 0 {
            return self.num_workers;
        }
        std::cmp::max(1, (num_cpus::get() * 3) / 4)
    }
}

// ============================================================================
// Closure
// ============================================================================

/// Escape-closure Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosureConfig {
    /// Memoize closures per abstract reference for the whole run
    pub memoize: bool,

    /// Maximum memoized closures before the cache stops admitting entries (1..=10000000)
    pub max_cached: usize,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            max_cached: 1_000_000,
        }
    }
}

impl ClosureConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_cached == 0 || self.max_cached > 10_000_000 {
            return Err(ConfigError::range_with_hint(
                "max_cached",
                self.max_cached,
                1,
                10_000_000,
                "Closure cache limit must be reasonable",
            ));
        }
        Ok(())
    }

    /// Builder: Set memoize
    pub fn memoize(mut self, v: bool) -> Self {
        self.memoize = v;
        self
    }

    /// Builder: Set max_cached
    pub fn max_cached(mut self, v: usize) -> Self {
        self.max_cached = v;
        self
    }
}

// ============================================================================
// Report
// ============================================================================

/// Report Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Pretty-print the JSON report
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}
