//! cpselect - Select annotation queries for one soundscape
//!
//! Usage: cpselect <artifact.json> [--output <report.json>] [--config <cpquery.toml>]

use anyhow::{Context, Result};
use clap::Parser;
use cpquery_cli::output::{print_json_summary, SelectionSummary};
use cpquery_cli::{init_logger, load_config, process_artifact};
use cpquery_core::ChangePointSelector;
use cpquery_format::{ReportWriter, SelectionReport};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "cpselect")]
#[command(about = "Select query windows at the strongest change points of a soundscape", long_about = None)]
struct Args {
    /// Artifact file with frame timings and event probabilities
    artifact_path: String,

    /// Write the full selection report (JSON) to this path
    #[arg(short, long)]
    output: Option<String>,

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

    run_cpselect(
        &args.artifact_path,
        args.output.as_deref(),
        args.config.as_deref(),
        args.n_queries,
    )
}

fn run_cpselect(
    artifact_path: &str,
    output_path: Option<&str>,
    config_path: Option<&str>,
    n_queries: Option<i64>,
) -> Result<()> {
    let artifact_path = Path::new(artifact_path);
    if !artifact_path.exists() {
        anyhow::bail!("Artifact file not found: {}", artifact_path.display());
    }

    let config = load_config(config_path, n_queries)?;
    let selector = ChangePointSelector::new(&config)?;

    log::info!("Processing: {}", artifact_path.display());
    let start = std::time::Instant::now();

    let (artifact, selection) = process_artifact(artifact_path, &selector)?;

    log::info!(
        "Selected {} queries for {} in {:.3}s",
        selection.queries.len(),
        artifact.soundscape,
        start.elapsed().as_secs_f64()
    );

    let output_path = output_path.map(Path::new);
    if let Some(path) = output_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        let report = SelectionReport::new(&artifact, &config, &selection);
        ReportWriter::new().write(path, &report)?;
        log::info!("Wrote report: {}", path.display());
    }

    print_json_summary(&SelectionSummary::success(
        artifact_path,
        output_path,
        &artifact,
        &selection,
    ));

    Ok(())
}
