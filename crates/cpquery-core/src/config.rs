//! Configuration for change-point query selection
//!
//! Provides TOML-based configuration for the distance signal, peak
//! selection and the query budget. Every field has a default so a
//! partial file (or no file at all) is valid.

use crate::error::{CpqError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CpqConfig {
    #[serde(default)]
    pub distance: DistanceConfig,
    #[serde(default)]
    pub peaks: PeakConfig,
    #[serde(default)]
    pub queries: QueryConfig,
}

/// How windows that overrun the series boundaries are treated
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Distance is 0 unless both windows fit inside the series
    #[default]
    Zero,
    /// Windows are clipped to the series; an empty window yields 0
    Truncate,
}

/// Reference level used when a prominence search reaches the series boundary
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProminenceFloor {
    /// A side that runs into the boundary contributes a base of 0
    #[default]
    Zero,
    /// A side that runs into the boundary contributes its lowest sample
    RunMinimum,
}

/// Past/future window distance configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DistanceConfig {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub edge_policy: EdgePolicy,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            window_size: default_window_size(),
            edge_policy: EdgePolicy::default(),
        }
    }
}

fn default_window_size() -> usize {
    1
}

impl DistanceConfig {
    /// Whether the furthest frame a window can reach, `i + 1 + offset + window_size`,
    /// stays addressable for every frame index
    pub fn span_fits(&self) -> bool {
        self.offset
            .checked_add(self.window_size)
            .and_then(|span| span.checked_add(1))
            .is_some_and(|span| span <= isize::MAX as usize)
    }
}

/// Peak detection configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PeakConfig {
    #[serde(default)]
    pub min_prominence: f64,
    #[serde(default)]
    pub prominence_floor: ProminenceFloor,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_prominence: 0.0,
            prominence_floor: ProminenceFloor::default(),
        }
    }
}

/// Query budget configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueryConfig {
    /// Number of query windows; boundaries selected = n_queries - 1
    #[serde(default = "default_n_queries")]
    pub n_queries: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            n_queries: default_n_queries(),
        }
    }
}

fn default_n_queries() -> i64 {
    7
}

impl CpqConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CpqError::config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CpqConfig = toml::from_str(content)
            .map_err(|e| CpqError::config(format!("failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.distance.window_size == 0 {
            return Err(CpqError::config("distance.window_size must be > 0"));
        }
        if !self.distance.span_fits() {
            return Err(CpqError::config(format!(
                "distance.offset + distance.window_size is out of range; got offset={}, window_size={}",
                self.distance.offset, self.distance.window_size
            )));
        }
        if !self.peaks.min_prominence.is_finite() || self.peaks.min_prominence < 0.0 {
            return Err(CpqError::config(format!(
                "peaks.min_prominence must be finite and >= 0; got {}",
                self.peaks.min_prominence
            )));
        }
        if self.queries.n_queries < 1 {
            return Err(CpqError::config(format!(
                "queries.n_queries must be >= 1; got {}",
                self.queries.n_queries
            )));
        }
        Ok(())
    }
}
