//! Artifact file reader

use crate::format::ArtifactFile;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct ArtifactReader;

impl ArtifactReader {
    /// Read one artifact file
    pub fn read(path: &Path) -> Result<ArtifactFile> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open artifact file: {}", path.display()))?;

        let artifact: ArtifactFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse artifact file: {}", path.display()))?;

        if artifact.timings.len() != artifact.probabilities.len() {
            anyhow::bail!(
                "Invalid artifact {}: {} timings but {} probabilities",
                path.display(),
                artifact.timings.len(),
                artifact.probabilities.len()
            );
        }

        log::debug!(
            "Loaded artifact {} ({} frames)",
            artifact.soundscape,
            artifact.probabilities.len()
        );

        Ok(artifact)
    }

    /// List artifact files (`*.json`, excluding reports) in a directory, sorted by path
    pub fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
            let is_report = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".report.json"));
            if path.is_file() && is_json && !is_report {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths)
    }
}
