//! Query boundary selection
//!
//! Ranks the peaks of a distance series by prominence and keeps the
//! strongest ones as boundaries between consecutive query windows.

use crate::config::PeakConfig;
use crate::error::{CpqError, Result};
use crate::peaks::{find_peaks, Peak};
use crate::series::DistanceSeries;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;


/// Ascending frame indices of the selected change points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBoundarySet {
    indices: Vec<usize>,
}

impl QueryBoundarySet {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Result of a boundary selection, with the peaks it was chosen from
#[derive(Debug, Clone)]
pub struct BoundarySelection {
    pub peaks: Vec<Peak>,
    pub boundaries: QueryBoundarySet,
}

/// Prominence-ranked boundary selector
#[derive(Debug, Clone)]
pub struct BoundarySelector {
    config: PeakConfig,
}

impl BoundarySelector {
    pub fn new(config: &PeakConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Select at most `max_count` boundaries from `distances`
    pub fn select(&self, distances: &DistanceSeries, max_count: usize) -> BoundarySelection {
        let peaks = find_peaks(distances.values(), self.config.prominence_floor);

        let candidates: Vec<Peak> = peaks
            .iter()
            .copied()
            .filter(|p| p.prominence >= self.config.min_prominence)
            .collect();

        let mut indices: Vec<usize> = rank_by_prominence(&candidates)
            .into_iter()
            .take(max_count)
            .map(|p| p.index)
            .collect();
        indices.sort_unstable();

        log::debug!(
            "Selected {} of {} peaks ({} above min prominence {})",
            indices.len(),
            peaks.len(),
            candidates.len(),
            self.config.min_prominence
        );

        BoundarySelection {
            peaks,
            boundaries: QueryBoundarySet { indices },
        }
    }
}

/// Order peaks by descending prominence, ties by ascending index
pub fn rank_by_prominence(peaks: &[Peak]) -> Vec<Peak> {
    let mut ranked = peaks.to_vec();
    ranked.sort_by(|a, b| {
        b.prominence
            .partial_cmp(&a.prominence)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    ranked
}

/// Select at most `max_count` query boundaries from `distances`.
///
/// Fails with `InvalidArgument` when `max_count` is negative.
pub fn find_query_boundaries(
    distances: &DistanceSeries,
    max_count: i64,
) -> Result<QueryBoundarySet> {
    let max_count = usize::try_from(max_count).map_err(|_| {
        CpqError::invalid_argument(format!("max_count must be >= 0; got {}", max_count))
    })?;
    Ok(BoundarySelector::new(&PeakConfig::default())
        .select(distances, max_count)
        .boundaries)
}

/// Number of boundaries needed to split a recording into `n_queries` windows
pub fn max_boundaries_for(n_queries: i64) -> Result<usize> {
    n_queries
        .checked_sub(1)
        .and_then(|k| usize::try_from(k).ok())
        .ok_or_else(|| {
            CpqError::invalid_argument(format!("n_queries must be >= 1; got {}", n_queries))
        })
}
