//! Frame-aligned series types
//!
//! All series share one index space: entry `i` describes frame `i`.

use crate::error::{CpqError, Result};
use serde::{Deserialize, Serialize};

/// Per-frame event pseudo-probabilities in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ProbabilitySeries {
    values: Vec<f64>,
}

impl ProbabilitySeries {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((idx, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(CpqError::invalid_argument(format!(
                "probability at frame {} must be in [0, 1]; got {}",
                idx, v
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for ProbabilitySeries {
    type Error = CpqError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<ProbabilitySeries> for Vec<f64> {
    fn from(series: ProbabilitySeries) -> Self {
        series.values
    }
}

/// Per-frame change-point distance, non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct DistanceSeries {
    values: Vec<f64>,
}

impl DistanceSeries {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((idx, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(CpqError::invalid_argument(format!(
                "distance at frame {} must be finite and >= 0; got {}",
                idx, v
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for DistanceSeries {
    type Error = CpqError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<DistanceSeries> for Vec<f64> {
    fn from(series: DistanceSeries) -> Self {
        series.values
    }
}

/// Start and end time (seconds) of every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct FrameTimings {
    frames: Vec<(f64, f64)>,
}

impl FrameTimings {
    pub fn new(frames: Vec<(f64, f64)>) -> Result<Self> {
        for (idx, &(start, end)) in frames.iter().enumerate() {
            if !start.is_finite() || !end.is_finite() || start < 0.0 || end < start {
                return Err(CpqError::invalid_argument(format!(
                    "frame {} timing must satisfy 0 <= start <= end; got ({}, {})",
                    idx, start, end
                )));
            }
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[(f64, f64)] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Midpoint of each frame, the time axis of every aligned series
    pub fn centers(&self) -> Vec<f64> {
        self.frames
            .iter()
            .map(|&(start, end)| (start + end) / 2.0)
            .collect()
    }

    /// End time of the last frame, 0 when there are no frames
    pub fn end_time(&self) -> f64 {
        self.frames
            .iter()
            .map(|&(_, end)| end)
            .fold(0.0, f64::max)
    }

    /// Fail unless `len` frames are described
    pub fn check_aligned(&self, len: usize, what: &str) -> Result<()> {
        if self.frames.len() != len {
            return Err(CpqError::invalid_argument(format!(
                "{} has {} frames but timings describe {}",
                what,
                len,
                self.frames.len()
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<(f64, f64)>> for FrameTimings {
    type Error = CpqError;

    fn try_from(frames: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(frames)
    }
}

impl From<FrameTimings> for Vec<(f64, f64)> {
    fn from(timings: FrameTimings) -> Self {
        timings.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_probability_range_is_enforced() {
        assert!(ProbabilitySeries::new(vec![0.0, 0.5, 1.0]).is_ok());
        assert!(ProbabilitySeries::new(vec![0.2, 1.1]).is_err());
        assert!(ProbabilitySeries::new(vec![-0.1]).is_err());
        assert!(ProbabilitySeries::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_distance_rejects_negative() {
        let err = DistanceSeries::new(vec![0.0, -1.0]).unwrap_err();
        assert!(err.to_string().contains("frame 1"));
        assert!(DistanceSeries::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_frame_centers() {
        let timings = FrameTimings::new(vec![(0.0, 1.0), (0.5, 1.5), (1.0, 2.0)]).unwrap();
        let centers = timings.centers();
        assert_relative_eq!(centers[0], 0.5);
        assert_relative_eq!(centers[1], 1.0);
        assert_relative_eq!(centers[2], 1.5);
        assert_relative_eq!(timings.end_time(), 2.0);
    }

    #[test]
    fn test_timings_reject_inverted_frame() {
        assert!(FrameTimings::new(vec![(1.0, 0.5)]).is_err());
    }

    #[test]
    fn test_alignment_check() {
        let timings = FrameTimings::new(vec![(0.0, 1.0), (1.0, 2.0)]).unwrap();
        assert!(timings.check_aligned(2, "probabilities").is_ok());
        let err = timings.check_aligned(3, "probabilities").unwrap_err();
        assert!(matches!(err, CpqError::InvalidArgument { .. }));
    }

    #[test]
    fn test_try_from_vec() {
        let series = ProbabilitySeries::try_from(vec![0.1, 0.9]).unwrap();
        assert_eq!(series.len(), 2);
        let values: Vec<f64> = series.into();
        assert_eq!(values, vec![0.1, 0.9]);
        assert!(ProbabilitySeries::try_from(vec![2.0]).is_err());
    }
}
