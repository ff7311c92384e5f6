use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Scale;

pub const DEFAULT_INPUT: &str = "measurements.csv";
pub const DEFAULT_LINEAR_OUTPUT: &str = "linegraph.png";
pub const DEFAULT_LOG_OUTPUT: &str = "linegraph_log.png";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for a plotting run.
///
/// Every field has a default, so a JSON config only needs to name the values it
/// changes. Command-line flags are applied on top through the `with_*` builders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlotConfig {
    /// Measurements CSV to read.
    pub input: PathBuf,
    /// Directory the images are written into.
    pub output_dir: PathBuf,
    /// File name of the linear-scale chart.
    pub linear_output: String,
    /// File name of the log-scale chart.
    pub log_output: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            linear_output: DEFAULT_LINEAR_OUTPUT.into(),
            log_output: DEFAULT_LOG_OUTPUT.into(),
            width: 1000,
            height: 600,
        }
    }
}

impl PlotConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_path(&self, scale: Scale) -> PathBuf {
        let name = match scale {
            Scale::Linear => &self.linear_output,
            Scale::Logarithmic => &self.log_output,
        };
        self.output_dir.join(name)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_file_names() {
        let config = PlotConfig::default();
        assert_eq!(config.input, PathBuf::from("measurements.csv"));
        assert_eq!(
            config.output_path(Scale::Linear),
            Path::new(".").join("linegraph.png")
        );
        assert_eq!(
            config.output_path(Scale::Logarithmic),
            Path::new(".").join("linegraph_log.png")
        );
        assert_eq!(config.dimensions(), (1000, 600));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        fs::write(&path, r#"{ "log_output": "log.png", "width": 640 }"#).unwrap();

        let config = PlotConfig::from_json_file(&path).unwrap();
        assert_eq!(config.log_output, "log.png");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 600);
        assert_eq!(config.linear_output, DEFAULT_LINEAR_OUTPUT);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        fs::write(&path, "{ width: ").unwrap();

        let err = PlotConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn builders_override_paths() {
        let config = PlotConfig::default()
            .with_input("runs/bench.csv")
            .with_output_dir("out");
        assert_eq!(config.input, PathBuf::from("runs/bench.csv"));
        assert_eq!(
            config.output_path(Scale::Linear),
            Path::new("out").join("linegraph.png")
        );
    }
}
