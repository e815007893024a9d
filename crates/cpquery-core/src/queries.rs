//! Query windows over a soundscape

use crate::error::{CpqError, Result};
use serde::{Deserialize, Serialize};

/// A time window handed to the annotator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Start of the window (seconds)
    pub start_s: f64,
    /// End of the window (seconds)
    pub end_s: f64,
}

impl Query {
    pub fn new(start_s: f64, end_s: f64) -> Self {
        Self { start_s, end_s }
    }

    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }

    pub fn center_s(&self) -> f64 {
        self.start_s + self.duration_s() / 2.0
    }
}

/// Split `[0, soundscape_length_s]` at each boundary time.
///
/// `k` ascending boundaries yield `k + 1` consecutive windows.
pub fn queries_from_boundaries(boundary_times: &[f64], soundscape_length_s: f64) -> Result<Vec<Query>> {
    if !soundscape_length_s.is_finite() || soundscape_length_s < 0.0 {
        return Err(CpqError::invalid_argument(format!(
            "soundscape length must be finite and >= 0; got {}",
            soundscape_length_s
        )));
    }

    let mut queries = Vec::with_capacity(boundary_times.len() + 1);
    let mut start = 0.0;
    for &t in boundary_times {
        if !(start..=soundscape_length_s).contains(&t) {
            return Err(CpqError::invalid_argument(format!(
                "boundary at {}s must be ascending and within [0, {}]",
                t, soundscape_length_s
            )));
        }
        queries.push(Query::new(start, t));
        start = t;
    }
    queries.push(Query::new(start, soundscape_length_s));

    Ok(queries)
}
