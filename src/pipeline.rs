use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, PlotConfig};
use crate::loader::{LoadError, load_table};
use crate::metrics::{MetricError, compute};
use crate::output::{stage_chart, write_chart};
use crate::partition::{Partitions, partition};
use crate::render::{ChartModel, RenderError};
use crate::types::Scale;

/// Failure classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    GenericFailure,
}

/// Any failure of a plotting run.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlotError::Load(LoadError::NotFound { .. }) => ErrorKind::FileNotFound,
            _ => ErrorKind::GenericFailure,
        }
    }
}

/// Loads the measurements at `path`, derives throughput, and splits by `verified`.
pub fn prepare(path: impl AsRef<Path>) -> Result<Partitions, PlotError> {
    let table = load_table(path)?;
    let measurements = compute(&table)?;
    let partitions = partition(measurements);
    debug!(
        verified = partitions.verified_true.len(),
        unverified = partitions.verified_false.len(),
        "partitioned measurements"
    );
    Ok(partitions)
}

/// Draws one chart variant and writes it to the configured output path.
pub fn render_scale(
    partitions: &Partitions,
    config: &PlotConfig,
    scale: Scale,
) -> Result<PathBuf, PlotError> {
    let model = ChartModel::build(partitions, scale);
    let path = write_chart(&model, &config.output_path(scale), config.dimensions())?;
    Ok(path)
}

/// Loads the configured input once and writes one chart per requested scale.
///
/// Every chart is rendered before any is moved into place, so a failure on one
/// scale leaves none of the outputs behind.
pub fn run(config: &PlotConfig, scales: &[Scale]) -> Result<Vec<PathBuf>, PlotError> {
    let partitions = prepare(&config.input)?;
    let staged = scales
        .iter()
        .map(|scale| {
            let model = ChartModel::build(&partitions, *scale);
            stage_chart(&model, &config.output_path(*scale), config.dimensions())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut written = Vec::with_capacity(staged.len());
    for chart in staged {
        debug!(path = %chart.target().display(), "committing chart");
        written.push(chart.commit()?);
    }
    Ok(written)
}
