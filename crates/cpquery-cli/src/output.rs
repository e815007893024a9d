//! JSON console output

use cpquery_core::QuerySelection;
use cpquery_format::ArtifactFile;
use serde::Serialize;
use std::path::Path;

/// Per-soundscape summary printed on stdout
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub status: String,
    pub input_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soundscape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_frames: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_peaks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_times: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<(f64, f64)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelectionSummary {
    pub fn success(
        input: &Path,
        output: Option<&Path>,
        artifact: &ArtifactFile,
        selection: &QuerySelection,
    ) -> Self {
        Self {
            status: "success".to_string(),
            input_file: input.display().to_string(),
            soundscape: Some(artifact.soundscape.clone()),
            output_file: output.map(|p| p.display().to_string()),
            num_frames: Some(artifact.probabilities.len()),
            num_peaks: Some(selection.peaks.len()),
            boundary_times: Some(selection.boundary_times.clone()),
            queries: Some(
                selection
                    .queries
                    .iter()
                    .map(|q| (q.start_s, q.end_s))
                    .collect(),
            ),
            error: None,
        }
    }

    pub fn failure(input: &Path, error: &anyhow::Error) -> Self {
        Self {
            status: "error".to_string(),
            input_file: input.display().to_string(),
            soundscape: None,
            output_file: None,
            num_frames: None,
            num_peaks: None,
            boundary_times: None,
            queries: None,
            error: Some(format!("{:#}", error)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    input_dir: String,
    processed: usize,
    failed: usize,
    processing_time_seconds: f64,
    results: &'a [SelectionSummary],
}

/// Print one summary as JSON
pub fn print_json_summary(summary: &SelectionSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing summary: {}", e),
    }
}

/// Print a batch of summaries with success/failure counts
pub fn print_json_batch(input_dir: &Path, summaries: &[SelectionSummary], elapsed_s: f64) {
    let failed = summaries.iter().filter(|s| !s.is_success()).count();
    if failed > 0 {
        log::warn!("{} of {} soundscapes failed", failed, summaries.len());
    }

    let output = BatchOutput {
        input_dir: input_dir.display().to_string(),
        processed: summaries.len() - failed,
        failed,
        processing_time_seconds: elapsed_s,
        results: summaries,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}
