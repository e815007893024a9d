//! cpquery core - change-point query selection
//!
//! Turns a per-frame event probability series into annotation queries:
//! a past/future window distance signal marks transitions, its most
//! prominent peaks become boundaries, and the boundaries split the
//! soundscape into query windows.

pub mod boundaries;
pub mod config;
pub mod distance;
pub mod error;
pub mod peaks;
pub mod queries;
pub mod selector;
pub mod series;

pub use boundaries::{
    find_query_boundaries, max_boundaries_for, BoundarySelection, BoundarySelector,
    QueryBoundarySet,
};
pub use config::{CpqConfig, EdgePolicy, ProminenceFloor};
pub use distance::{compute_distance_series, DistanceExtractor};
pub use error::CpqError;
pub use peaks::{find_peaks, Peak};
pub use queries::{queries_from_boundaries, Query};
pub use selector::{ChangePointSelector, QuerySelection};
pub use series::{DistanceSeries, FrameTimings, ProbabilitySeries};

/// Select query windows for one soundscape
pub fn select_queries(
    probabilities: &ProbabilitySeries,
    timings: &FrameTimings,
    soundscape_length_s: Option<f64>,
    config: &CpqConfig,
) -> error::Result<QuerySelection> {
    ChangePointSelector::new(config)?.select(probabilities, timings, soundscape_length_s)
}
