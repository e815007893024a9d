//! Peak detection with topographic prominence
//!
//! A peak is an interior sample strictly greater than both neighbours.
//! Its prominence is how far the signal has to drop, on the shallower
//! side, before it reaches either a higher sample or the series boundary.

use crate::config::ProminenceFloor;
use serde::{Deserialize, Serialize};

/// A local maximum of a distance series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Frame index
    pub index: usize,
    /// Sample value at the peak
    pub height: f64,
    /// Height above the higher of the two bases
    pub prominence: f64,
    /// Index of the left reference level: the lowest sample before a higher
    /// one, or index 0 when the zero floor applied at the boundary
    pub left_base: usize,
    /// Index of the right reference level: the lowest sample before a higher
    /// one, or the last index when the zero floor applied at the boundary
    pub right_base: usize,
}

/// Find every strict local maximum of `values` together with its prominence.
///
/// Endpoints are never peaks and plateaus are not peaks. Peaks come back in
/// ascending index order.
pub fn find_peaks(values: &[f64], floor: ProminenceFloor) -> Vec<Peak> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    for i in 1..n - 1 {
        let height = values[i];
        if !(values[i - 1] < height && height > values[i + 1]) {
            continue;
        }

        let left = walk_to_base(values, i, (0..i).rev());
        let right = walk_to_base(values, i, i + 1..n);

        let (left_level, left_base) = reference(&left, floor, 0);
        let (right_level, right_base) = reference(&right, floor, n - 1);
        let prominence = (height - left_level.max(right_level)).max(0.0);

        peaks.push(Peak {
            index: i,
            height,
            prominence,
            left_base,
            right_base,
        });
    }

    log::debug!("Found {} peaks in {} samples", peaks.len(), n);

    peaks
}

struct BaseSearch {
    min_index: usize,
    min_value: f64,
    hit_boundary: bool,
}

/// Reference level and its index for one side of a peak
fn reference(side: &BaseSearch, floor: ProminenceFloor, boundary: usize) -> (f64, usize) {
    match (floor, side.hit_boundary) {
        (ProminenceFloor::Zero, true) => (0.0, boundary),
        _ => (side.min_value, side.min_index),
    }
}

fn walk_to_base(values: &[f64], peak: usize, indices: impl Iterator<Item = usize>) -> BaseSearch {
    let height = values[peak];
    let mut search = BaseSearch {
        min_index: peak,
        min_value: height,
        hit_boundary: true,
    };

    for j in indices {
        if values[j] > height {
            search.hit_boundary = false;
            break;
        }
        if values[j] < search.min_value {
            search.min_value = values[j];
            search.min_index = j;
        }
    }

    search
}
