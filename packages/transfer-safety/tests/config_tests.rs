//! Verifier configuration files and range invariants

use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::io::Write;
use tempfile::NamedTempFile;
use transfer_safety::config::{ConfigError, ParallelConfig, VerifierConfig};
use transfer_safety::{AnalysisContext, TransferError};

#[test]
fn test_load_yaml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "parallel:\n  num_workers: 2\n  min_sites: 8\nclosure:\n  memoize: false\nreport:\n  pretty: false"
    )
    .unwrap();

    let config = VerifierConfig::from_yaml(file.path()).unwrap();

    assert_eq!(config.parallel.num_workers, 2);
    assert_eq!(config.parallel.min_sites, 8);
    assert!(config.parallel.enable_rayon);
    assert!(!config.closure.memoize);
    assert!(!config.report.pretty);
}

#[test]
fn test_saved_config_reloads() {
    let config = VerifierConfig::default().with_parallel(ParallelConfig::default().min_sites(500));
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

    assert_eq!(VerifierConfig::from_yaml(file.path()).unwrap(), config);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = VerifierConfig::from_yaml(dir.path().join("verifier.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_context_rejects_invalid_config() {
    let config = VerifierConfig::default().with_parallel(ParallelConfig::default().min_sites(0));
    assert!(matches!(
        AnalysisContext::init(config),
        Err(TransferError::Config(ConfigError::Range { .. }))
    ));
}

#[quickcheck]
fn qc_parallel_range_invariants(workers: usize, min_sites: usize) -> TestResult {
    if workers > 256 || min_sites == 0 || min_sites > 1_000_000 {
        return TestResult::discard();
    }
    let config = ParallelConfig::default().num_workers(workers).min_sites(min_sites);
    TestResult::from_bool(config.validate().is_ok() && config.resolved_workers() >= 1)
}

#[quickcheck]
fn qc_out_of_range_workers_rejected(workers: usize) -> TestResult {
    if workers <= 256 {
        return TestResult::discard();
    }
    TestResult::from_bool(ParallelConfig::default().num_workers(workers).validate().is_err())
}
