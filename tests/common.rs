use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use txnplot::PlotConfig;

pub const HEADER: &str = "num_txns,elapsed_ms,num_keys,verified";

/// Scratch directory holding a measurements file and the chart outputs.
#[allow(dead_code)]
pub struct Workspace {
    dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir for plot workspace"),
        }
    }

    /// Writes `rows` below the standard header as `measurements.csv`.
    pub fn with_rows(rows: &[&str]) -> Self {
        let workspace = Self::new();
        let mut contents = String::from(HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        workspace.write_input(&contents);
        workspace
    }

    pub fn write_input(&self, contents: &str) {
        fs::write(self.input(), contents).expect("write measurements");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("measurements.csv")
    }

    pub fn config(&self) -> PlotConfig {
        PlotConfig::default()
            .with_input(self.input())
            .with_output_dir(self.dir.path().join("charts"))
    }

    /// Files currently present in the output directory.
    pub fn outputs(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.dir.path().join("charts")) {
            Ok(entries) => entries
                .map(|entry| entry.expect("read output entry").path())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
