//! cpbatch - Select annotation queries for every soundscape in a directory
//!
//! Usage: cpbatch <input_dir> <output_dir> [--config <cpquery.toml>]

use anyhow::{Context, Result};
use clap::Parser;
use cpquery_cli::output::{print_json_batch, SelectionSummary};
use cpquery_cli::{init_logger, load_config, process_artifact};
use cpquery_core::{ChangePointSelector, CpqConfig};
use cpquery_format::{ArtifactReader, ReportWriter, SelectionReport};
use rayon::prelude::*;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "cpbatch")]
#[command(about = "Select query windows for a directory of soundscape artifacts", long_about = None)]
struct Args {
    /// Directory containing artifact files (*.json)
    input_dir: String,

    /// Output directory for .report.json files
    output_dir: String,

    /// Path to configuration file (TOML). Defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Number of queries (overrides the config file)
    #[arg(short = 'n', long)]
    n_queries: Option<i64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.verbose);

    run_cpbatch(
        &args.input_dir,
        &args.output_dir,
        args.config.as_deref(),
        args.n_queries,
    )
}

fn run_cpbatch(
    input_dir: &str,
    output_dir: &str,
    config_path: Option<&str>,
    n_queries: Option<i64>,
) -> Result<()> {
    let input_dir = Path::new(input_dir);
    let output_dir = Path::new(output_dir);

    if !input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", input_dir.display());
    }
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let config = load_config(config_path, n_queries)?;
    let selector = ChangePointSelector::new(&config)?;

    let artifacts = ArtifactReader::list_dir(input_dir)?;
    log::info!(
        "Found {} artifact files, processing in parallel...",
        artifacts.len()
    );

    let start = std::time::Instant::now();
    let summaries: Vec<SelectionSummary> = artifacts
        .par_iter()
        .map(|path| match select_and_write(path, output_dir, &config, &selector) {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("Failed to process {}: {:#}", path.display(), e);
                SelectionSummary::failure(path, &e)
            }
        })
        .collect();
    let elapsed = start.elapsed().as_secs_f64();

    log::info!(
        "Processed {} soundscapes in {:.2}s",
        summaries.len(),
        elapsed
    );

    print_json_batch(input_dir, &summaries, elapsed);

    Ok(())
}

fn select_and_write(
    artifact_path: &Path,
    output_dir: &Path,
    config: &CpqConfig,
    selector: &ChangePointSelector,
) -> Result<SelectionSummary> {
    log::debug!("Processing: {}", artifact_path.display());

    let (artifact, selection) = process_artifact(artifact_path, selector)?;

    let report_path = ReportWriter::report_path(output_dir, artifact_path);
    let report = SelectionReport::new(&artifact, config, &selection);
    ReportWriter::new().write(&report_path, &report)?;

    Ok(SelectionSummary::success(
        artifact_path,
        Some(&report_path),
        &artifact,
        &selection,
    ))
}
