use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, warn};

use crate::render::{ChartModel, RenderError, draw, draw_error};
use crate::types::Scale;

/// A chart rendered to its staging file but not yet moved into place.
///
/// Dropping it without calling [`StagedChart::commit`] removes the staging file,
/// so a run that fails partway never leaves images behind.
#[derive(Debug)]
pub struct StagedChart {
    staging: PathBuf,
    target: PathBuf,
    scale: Scale,
    committed: bool,
}

impl StagedChart {
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Renames the staged image over the target, replacing any existing file.
    pub fn commit(mut self) -> Result<PathBuf, RenderError> {
        fs::rename(&self.staging, &self.target).map_err(|source| RenderError::Io {
            path: self.target.clone(),
            source,
        })?;
        self.committed = true;

        info!(path = %self.target.display(), scale = %self.scale, "wrote chart");
        println!("Graph saved to {}", self.target.display());
        Ok(self.target.clone())
    }
}

impl Drop for StagedChart {
    fn drop(&mut self) {
        if !self.committed {
            remove_staging(&self.staging);
        }
    }
}

/// Renders `model` into the staging file for `path`.
pub fn stage_chart(
    model: &ChartModel,
    path: &Path,
    dimensions: (u32, u32),
) -> Result<StagedChart, RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let staging = staging_path(path);
    if let Err(err) = render_bitmap(model, &staging, dimensions) {
        remove_staging(&staging);
        return Err(err);
    }

    Ok(StagedChart {
        staging,
        target: path.to_path_buf(),
        scale: model.scale,
        committed: false,
    })
}

/// Renders `model` to a bitmap at `path`, replacing any existing file.
pub fn write_chart(
    model: &ChartModel,
    path: &Path,
    dimensions: (u32, u32),
) -> Result<PathBuf, RenderError> {
    stage_chart(model, path, dimensions)?.commit()
}

fn remove_staging(staging: &Path) {
    if staging.exists() {
        if let Err(err) = fs::remove_file(staging) {
            warn!(path = %staging.display(), error = %err, "failed to remove staging file");
        }
    }
}

fn render_bitmap(
    model: &ChartModel,
    path: &Path,
    dimensions: (u32, u32),
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, dimensions).into_drawing_area();
    draw(model, &root)?;
    root.present().map_err(draw_error)?;
    Ok(())
}

/// `dir/linegraph.png` stages as `dir/linegraph.tmp.png`. The extension is kept
/// because the bitmap encoder picks the image format from it.
pub fn staging_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart".to_string());
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    path.with_file_name(format!("{stem}.tmp.{extension}"))
}
