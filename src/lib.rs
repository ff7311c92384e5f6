//! Core crate exports for txnplot.
//!
//! The pipeline reads benchmark measurements, derives throughput, splits rows by
//! whether transaction verification was enabled, and renders the comparison as
//! a linear or logarithmic line chart.

pub mod config;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod render;
pub mod types;

pub use config::PlotConfig;
pub use partition::Partitions;
pub use pipeline::{ErrorKind, PlotError, prepare, render_scale, run};
pub use render::ChartModel;
pub use types::{Measurement, RawRecord, Scale, Table};
