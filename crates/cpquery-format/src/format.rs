//! JSON structures for artifacts and selection reports

use cpquery_core::{CpqConfig, FrameTimings, Peak, ProbabilitySeries, QuerySelection};
use serde::{Deserialize, Serialize};

pub const REPORT_VERSION: &str = "1.0";

/// Precomputed classifier output for one soundscape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    /// Soundscape basename
    pub soundscape: String,
    /// Recording length; the last frame end is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundscape_length_s: Option<f64>,
    /// `[start_s, end_s]` per frame
    pub timings: FrameTimings,
    /// Event pseudo-probability per frame
    pub probabilities: ProbabilitySeries,
}

/// Peak entry of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakReport {
    pub index: usize,
    pub time_s: f64,
    pub height: f64,
    pub prominence: f64,
}

/// Query window entry of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    pub query_id: usize,
    pub start_s: f64,
    pub end_s: f64,
    pub center_s: f64,
}

/// Complete selection report for one soundscape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub version: String,
    pub created_at: String,
    pub soundscape: String,
    pub soundscape_length_s: f64,
    pub config: CpqConfig,
    pub frame_centers: Vec<f64>,
    pub probabilities: Vec<f64>,
    pub distances: Vec<f64>,
    pub peaks: Vec<PeakReport>,
    pub boundary_indices: Vec<usize>,
    pub boundary_times: Vec<f64>,
    pub queries: Vec<QueryReport>,
}

impl SelectionReport {
    /// Build a report from a finished selection
    pub fn new(artifact: &ArtifactFile, config: &CpqConfig, selection: &QuerySelection) -> Self {
        let peaks = selection
            .peaks
            .iter()
            .map(|p: &Peak| PeakReport {
                index: p.index,
                time_s: selection.frame_centers[p.index],
                height: p.height,
                prominence: p.prominence,
            })
            .collect();

        let queries = selection
            .queries
            .iter()
            .enumerate()
            .map(|(query_id, q)| QueryReport {
                query_id,
                start_s: q.start_s,
                end_s: q.end_s,
                center_s: q.center_s(),
            })
            .collect();

        let soundscape_length_s = selection
            .queries
            .last()
            .map(|q| q.end_s)
            .unwrap_or_default();

        Self {
            version: REPORT_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            soundscape: artifact.soundscape.clone(),
            soundscape_length_s,
            config: config.clone(),
            frame_centers: selection.frame_centers.clone(),
            probabilities: artifact.probabilities.values().to_vec(),
            distances: selection.distances.values().to_vec(),
            peaks,
            boundary_indices: selection.boundaries.indices().to_vec(),
            boundary_times: selection.boundary_times.clone(),
            queries,
        }
    }
}
