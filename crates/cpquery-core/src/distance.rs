//! Change-point distance signal
//!
//! For every frame, compares the mean probability of a window of past
//! frames with the mean of a window of future frames. Large distances mark
//! likely transitions in event activity.

use crate::config::{DistanceConfig, EdgePolicy};
use crate::error::{CpqError, Result};
use crate::series::{DistanceSeries, ProbabilitySeries};

/// Past/future window distance extractor
#[derive(Debug, Clone)]
pub struct DistanceExtractor {
    offset: usize,
    window_size: usize,
    edge_policy: EdgePolicy,
}

impl DistanceExtractor {
    pub fn new(config: &DistanceConfig) -> Result<Self> {
        if config.window_size == 0 {
            return Err(CpqError::invalid_argument("window_size must be > 0"));
        }
        if !config.span_fits() {
            return Err(CpqError::invalid_argument(format!(
                "offset + window_size is out of range; got offset={}, window_size={}",
                config.offset, config.window_size
            )));
        }
        Ok(Self {
            offset: config.offset,
            window_size: config.window_size,
            edge_policy: config.edge_policy,
        })
    }

    /// Compute the distance series, index-aligned with `probabilities`
    pub fn compute(&self, probabilities: &ProbabilitySeries) -> Result<DistanceSeries> {
        let values = probabilities.values();
        let n = values.len();

        let distances: Vec<f64> = (0..n)
            .map(|i| match self.windows(i, n) {
                Some((past, future)) => {
                    let past_mean = window_mean(&values[past.0..past.1]);
                    let future_mean = window_mean(&values[future.0..future.1]);
                    euclidean_distance(&[past_mean], &[future_mean])
                }
                None => 0.0,
            })
            .collect();

        log::debug!(
            "Computed distance series: {} frames, offset={}, window_size={}, edge_policy={:?}",
            n,
            self.offset,
            self.window_size,
            self.edge_policy
        );

        DistanceSeries::new(distances)
    }

    /// Half-open past and future frame ranges at frame `i`, or `None` when
    /// the edge policy leaves the distance undefined (reported as 0).
    fn windows(&self, i: usize, n: usize) -> Option<((usize, usize), (usize, usize))> {
        let m = self.window_size;

        // past: the m frames ending at i - offset (inclusive)
        let past_end = i.checked_sub(self.offset)? + 1;
        let past_start = past_end.saturating_sub(m);
        // future: the m frames starting right after i + offset
        let future_start = i.checked_add(self.offset)?.checked_add(1)?;
        let future_end = future_start.saturating_add(m);

        let (past, future) = match self.edge_policy {
            EdgePolicy::Zero => {
                if past_end < m || future_end > n {
                    return None;
                }
                ((past_start, past_end), (future_start, future_end))
            }
            EdgePolicy::Truncate => (
                (past_start, past_end),
                (future_start.min(n), future_end.min(n)),
            ),
        };

        if past.0 >= past.1 || future.0 >= future.1 {
            return None;
        }

        Some((past, future))
    }
}

/// Compute the change-point distance series of `probabilities`
pub fn compute_distance_series(
    probabilities: &ProbabilitySeries,
    offset: usize,
    window_size: usize,
    edge_policy: EdgePolicy,
) -> Result<DistanceSeries> {
    DistanceExtractor::new(&DistanceConfig {
        offset,
        window_size,
        edge_policy,
    })?
    .compute(probabilities)
}

/// Euclidean distance between two equally sized vectors
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn probs(values: &[f64]) -> ProbabilitySeries {
        ProbabilitySeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_step_detected_at_transition() {
        let series = probs(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let ds = compute_distance_series(&series, 0, 1, EdgePolicy::Zero).unwrap();

        assert_eq!(ds.len(), 6);
        assert_abs_diff_eq!(ds.values()[2], 1.0);
        assert_abs_diff_eq!(ds.values()[1], 0.0);
        assert_abs_diff_eq!(ds.values()[3], 0.0);
        // future window runs past the end
        assert_abs_diff_eq!(ds.values()[5], 0.0);
    }

    #[test]
    fn test_constant_series_is_flat() {
        let series = probs(&[0.3; 20]);
        for policy in [EdgePolicy::Zero, EdgePolicy::Truncate] {
            let ds = compute_distance_series(&series, 1, 3, policy).unwrap();
            assert!(ds.values().iter().all(|&d| d.abs() < 1e-12));
        }
    }

    #[test]
    fn test_zero_policy_blanks_edges() {
        let series = probs(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let ds = compute_distance_series(&series, 0, 2, EdgePolicy::Zero).unwrap();

        // past window needs frames i-1..=i, future needs i+1..=i+2
        assert_abs_diff_eq!(ds.values()[0], 0.0);
        assert_abs_diff_eq!(ds.values()[6], 0.0);
        assert_abs_diff_eq!(ds.values()[7], 0.0);
        assert_abs_diff_eq!(ds.values()[1], 0.0);
    }

    #[test]
    fn test_truncate_policy_shrinks_windows() {
        let series = probs(&[1.0, 0.0, 0.0, 0.0]);
        let ds = compute_distance_series(&series, 0, 2, EdgePolicy::Truncate).unwrap();

        // past = [0], future = [1, 2]
        assert_abs_diff_eq!(ds.values()[0], 1.0);
        // past = [0, 1] mean 0.5, future = [2, 3] mean 0
        assert_abs_diff_eq!(ds.values()[1], 0.5);
        // no future frames at the last index
        assert_abs_diff_eq!(ds.values()[3], 0.0);
    }

    #[test]
    fn test_offset_separates_windows() {
        let series = probs(&[0.0, 0.0, 0.5, 1.0, 1.0]);
        let ds = compute_distance_series(&series, 1, 1, EdgePolicy::Zero).unwrap();

        // at i = 2: past = [1] = 0.0, future = [4] = 1.0
        assert_abs_diff_eq!(ds.values()[2], 1.0);
        // at i = 0: past would start before the series
        assert_abs_diff_eq!(ds.values()[0], 0.0);
    }

    #[test]
    fn test_empty_series() {
        let ds = compute_distance_series(&probs(&[]), 0, 1, EdgePolicy::Zero).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_zero_window_is_invalid() {
        let err = compute_distance_series(&probs(&[0.1, 0.2]), 0, 0, EdgePolicy::Zero).unwrap_err();
        assert!(matches!(err, CpqError::InvalidArgument { .. }));
    }

    #[test]
    fn test_oversized_offset_or_window_is_invalid() {
        let series = probs(&[0.0, 0.5, 1.0]);
        for policy in [EdgePolicy::Zero, EdgePolicy::Truncate] {
            let err = compute_distance_series(&series, usize::MAX, 1, policy).unwrap_err();
            assert!(matches!(err, CpqError::InvalidArgument { .. }));
            let err = compute_distance_series(&series, i64::MAX as usize, 1, policy).unwrap_err();
            assert!(matches!(err, CpqError::InvalidArgument { .. }));
            let err = compute_distance_series(&series, 0, i64::MAX as usize, policy).unwrap_err();
            assert!(matches!(err, CpqError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_large_offset_and_window_beyond_series() {
        let series = probs(&[1.0, 0.0, 0.0, 0.0]);
        let large = 1usize << 40;

        for policy in [EdgePolicy::Zero, EdgePolicy::Truncate] {
            // windows never fit once the offset exceeds the series
            let ds = compute_distance_series(&series, large, 3, policy).unwrap();
            assert!(ds.values().iter().all(|&d| d == 0.0));
        }

        let ds = compute_distance_series(&series, 0, large, EdgePolicy::Zero).unwrap();
        assert!(ds.values().iter().all(|&d| d == 0.0));

        // clipped: past = [0], future = [1, 2, 3]
        let ds = compute_distance_series(&series, 0, large, EdgePolicy::Truncate).unwrap();
        assert_abs_diff_eq!(ds.values()[0], 1.0);
        assert_abs_diff_eq!(ds.values()[3], 0.0);
    }

    #[test]
    fn test_euclidean_distance() {
        assert_abs_diff_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_abs_diff_eq!(euclidean_distance(&[0.25], &[0.75]), 0.5);
    }
}
