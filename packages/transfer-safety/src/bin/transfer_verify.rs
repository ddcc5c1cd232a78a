//! Transfer Verification CLI
//!
//! Verifies every ownership transfer of one capsule template described by a
//! program model and prints the verdicts.
//!
//! # Usage
//!
//! ```bash
//! # Text summary, JSON report log written next to the model
//! cargo run --bin transfer-verify -- --model target/models/Master.json --output-dir target/transfer
//!
//! # Full JSON report on stdout, no worker pool
//! cargo run --bin transfer-verify -- --model Master.json --format json --sequential
//! ```
//!
//! Exit status: 0 when every transfer is safe, 1 when any is unsafe, 2 on error.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use transfer_safety::{ProgramModel, ResultsIndex, TransferSafetyPipeline, VerifierConfig};

#[derive(Parser)]
#[command(name = "transfer-verify")]
#[command(about = "Ownership-transfer safety verification for capsule templates", long_about = None)]
struct Cli {
    /// Program model (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Verifier configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the JSON report log
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable the worker pool
    #[arg(long)]
    sequential: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every transfer is safe
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = match cli.config {
        Some(ref path) => VerifierConfig::from_yaml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VerifierConfig::default(),
    };
    if cli.sequential {
        config = config.sequential();
    }

    let model = ProgramModel::from_path(&cli.model)
        .with_context(|| format!("loading program model {}", cli.model.display()))?;
    let mut program = model.into_collaborators()?;

    let pipeline = TransferSafetyPipeline::new(config)?;
    let index = pipeline.run_program(&mut program)?;

    match cli.format {
        OutputFormat::Text => print_text(&index),
        OutputFormat::Json => println!("{}", index.report_json(true)?),
    }

    if let Some(ref dir) = cli.output_dir {
        pipeline.write_report(&index, dir)?;
    }

    let all_safe = !index.has_unsafe_transfers();
    pipeline.finish();
    Ok(all_safe)
}

fn print_text(index: &ResultsIndex) {
    let stats = index.stats();
    println!("capsule {}", index.template());
    println!(
        "  {} sites in {} nodes, {} transfers, {} unsafe",
        stats.sites, stats.nodes, stats.transfers, stats.unsafe_transfers
    );

    for (site, result) in index.results() {
        for (slot, outcome) in result.transfers() {
            println!("  {:<6} {} {}", outcome.safety, site, slot);
        }
    }

    for (method, sites) in index.unsafe_sites_by_method() {
        println!("unsafe in {}:", method);
        for site in sites {
            println!("  {}", site);
        }
    }
}
