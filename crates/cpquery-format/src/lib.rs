//! cpquery artifact and report formats
//!
//! Input: per-frame probabilities and frame timings of one soundscape,
//! produced by an external classifier. Output: the selection report that a
//! plotting tool overlays on the probability chart.

pub mod format;
pub mod reader;
pub mod writer;

pub use format::{
    ArtifactFile, PeakReport, QueryReport, SelectionReport, REPORT_VERSION,
};
pub use reader::ArtifactReader;
pub use writer::ReportWriter;
