//! Change-point query selection pipeline
//!
//! Probabilities -> distance series -> ranked peaks -> boundaries -> query
//! windows.

use crate::boundaries::{max_boundaries_for, BoundarySelector, QueryBoundarySet};
use crate::config::CpqConfig;
use crate::distance::DistanceExtractor;
use crate::error::{CpqError, Result};
use crate::peaks::Peak;
use crate::queries::{queries_from_boundaries, Query};
use crate::series::{DistanceSeries, FrameTimings, ProbabilitySeries};

/// Everything derived for one soundscape
#[derive(Debug, Clone)]
pub struct QuerySelection {
    /// Frame centers (seconds), the time axis of the series below
    pub frame_centers: Vec<f64>,
    pub distances: DistanceSeries,
    pub peaks: Vec<Peak>,
    pub boundaries: QueryBoundarySet,
    /// Frame-center time of each boundary
    pub boundary_times: Vec<f64>,
    pub queries: Vec<Query>,
}

/// Selects query windows at the strongest change points
pub struct ChangePointSelector {
    extractor: DistanceExtractor,
    boundary_selector: BoundarySelector,
    max_boundaries: usize,
}

impl ChangePointSelector {
    pub fn new(config: &CpqConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: DistanceExtractor::new(&config.distance)?,
            boundary_selector: BoundarySelector::new(&config.peaks),
            max_boundaries: max_boundaries_for(config.queries.n_queries)?,
        })
    }

    /// Run the selection for one soundscape.
    ///
    /// The soundscape length defaults to the end of the last frame. Frames
    /// padded past a declared length put their boundaries at the length.
    pub fn select(
        &self,
        probabilities: &ProbabilitySeries,
        timings: &FrameTimings,
        soundscape_length_s: Option<f64>,
    ) -> Result<QuerySelection> {
        timings.check_aligned(probabilities.len(), "probability series")?;

        let distances = self.extractor.compute(probabilities)?;
        let selection = self.boundary_selector.select(&distances, self.max_boundaries);

        let length = soundscape_length_s.unwrap_or_else(|| timings.end_time());
        let frame_centers = timings.centers();
        let boundary_times: Vec<f64> = selection
            .boundaries
            .indices()
            .iter()
            .map(|&i| frame_centers[i].min(length))
            .collect();

        let clamped = selection
            .boundaries
            .indices()
            .iter()
            .filter(|&&i| frame_centers[i] > length)
            .count();
        if clamped > 0 {
            log::warn!(
                "{} boundaries lie past the soundscape length {:.2}s; clamped",
                clamped,
                length
            );
        }

        if boundary_times.windows(2).any(|w| w[0] > w[1]) {
            return Err(CpqError::invalid_argument(
                "frame timings must be ordered by time",
            ));
        }
        let queries = queries_from_boundaries(&boundary_times, length)?;

        log::info!(
            "Selected {} boundaries ({} peaks) -> {} queries over {:.2}s",
            selection.boundaries.len(),
            selection.peaks.len(),
            queries.len(),
            length
        );

        Ok(QuerySelection {
            frame_centers,
            distances,
            peaks: selection.peaks,
            boundaries: selection.boundaries,
            boundary_times,
            queries,
        })
    }
}
