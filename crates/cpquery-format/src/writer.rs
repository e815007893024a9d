//! Selection report writer

use crate::format::SelectionReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct ReportWriter {
    pretty: bool,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Write a report as JSON
    pub fn write(&self, path: &Path, report: &SelectionReport) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;

        let mut writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, report)?;
        } else {
            serde_json::to_writer(&mut writer, report)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }

    /// `<output_dir>/<stem>.report.json` for an artifact path
    pub fn report_path(output_dir: &Path, artifact_path: &Path) -> PathBuf {
        let stem = artifact_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("soundscape");
        output_dir.join(format!("{}.report.json", stem))
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ArtifactFile;
    use cpquery_core::CpqConfig;

    #[test]
    fn test_default_writer_is_pretty() {
        assert!(ReportWriter::default().pretty);
        assert!(!ReportWriter::compact().pretty);
    }

    #[test]
    fn test_report_path() {
        let path = ReportWriter::report_path(Path::new("/out"), Path::new("/in/soundscape_3.json"));
        assert_eq!(path, PathBuf::from("/out/soundscape_3.report.json"));
    }

    #[test]
    fn test_write_and_parse_back() {
        let artifact: ArtifactFile = serde_json::from_str(
            r#"{"soundscape": "s", "timings": [[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]], "probabilities": [0.0, 1.0, 0.0]}"#,
        )
        .unwrap();
        let config = CpqConfig::default();
        let selection = cpquery_core::select_queries(
            &artifact.probabilities,
            &artifact.timings,
            None,
            &config,
        )
        .unwrap();
        let report = SelectionReport::new(&artifact, &config, &selection);

        let dir = std::env::temp_dir().join(format!("cpquery-writer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("s.report.json");
        ReportWriter::compact().write(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: SelectionReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.soundscape, "s");
        assert_eq!(parsed.distances.len(), 3);
        assert_eq!(parsed.config, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
