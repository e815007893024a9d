//! Shared plumbing for the cpquery command-line tools

pub mod output;

use anyhow::{Context, Result};
use cpquery_core::{ChangePointSelector, CpqConfig, QuerySelection};
use cpquery_format::{ArtifactFile, ArtifactReader};
use std::path::Path;

/// Initialize logging.
///
/// Default: no logs (clean JSON on stdout). Verbose: Info level.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Load the TOML config at `path`, or the defaults when no path is given
pub fn load_config(path: Option<&str>, n_queries: Option<i64>) -> Result<CpqConfig> {
    let mut config = match path {
        Some(path) => {
            let config = CpqConfig::load(Path::new(path))?;
            log::info!("Loaded configuration from: {}", path);
            config
        }
        None => CpqConfig::default(),
    };

    if let Some(n) = n_queries {
        config.queries.n_queries = n;
    }
    config.validate()?;

    Ok(config)
}

/// Read one artifact and run the query selection on it
pub fn process_artifact(
    path: &Path,
    selector: &ChangePointSelector,
) -> Result<(ArtifactFile, QuerySelection)> {
    let artifact = ArtifactReader::read(path)?;
    let selection = selector
        .select(
            &artifact.probabilities,
            &artifact.timings,
            artifact.soundscape_length_s,
        )
        .with_context(|| format!("Query selection failed for {}", path.display()))?;
    Ok((artifact, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config_with_override() {
        let config = load_config(None, Some(3)).unwrap();
        assert_eq!(config.queries.n_queries, 3);
        assert_eq!(config.distance.window_size, 1);
    }

    #[test]
    fn test_override_is_validated() {
        assert!(load_config(None, Some(0)).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some("/nonexistent/cpquery.toml"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_process_artifact() {
        let dir = std::env::temp_dir().join(format!("cpquery-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("s.json");
        std::fs::write(
            &path,
            r#"{"soundscape": "s", "soundscape_length_s": 4.0,
                "timings": [[0.0, 1.0], [0.5, 1.5], [1.0, 2.0], [1.5, 2.5], [2.0, 3.0], [2.5, 3.5]],
                "probabilities": [0.0, 0.0, 1.0, 1.0, 0.0, 0.0]}"#,
        )
        .unwrap();

        let config = load_config(None, Some(2)).unwrap();
        let selector = ChangePointSelector::new(&config).unwrap();
        let (artifact, selection) = process_artifact(&path, &selector).unwrap();

        assert_eq!(artifact.soundscape, "s");
        assert_eq!(selection.boundaries.len(), 1);
        assert_eq!(selection.queries.len(), 2);
        assert!((selection.queries[1].end_s - 4.0).abs() < 1e-12);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
