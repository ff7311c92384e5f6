//! Chart construction and drawing.
//!
//! Rendering is split in two steps. [`ChartModel::build`] turns partitions into a
//! plain description of the chart: labels, ranges, styles and points. [`draw`]
//! then paints a model onto any plotters backend. Linear and log charts share
//! both steps and differ only in the [`Scale`] they are built with.

use std::ops::Range;

use plotters::coord::Shift;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use thiserror::Error;
use tracing::debug;

use crate::partition::Partitions;
use crate::types::{Measurement, Scale};

const RANGE_PADDING: f64 = 0.05;
const MARKER_SIZE: i32 = 4;
const LINE_WIDTH: u32 = 2;
const FONT: &str = "sans-serif";

/// Errors raised while drawing or writing a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn draw_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(err.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub marker: Marker,
    pub line: LineKind,
    pub color: (u8, u8, u8),
}

impl SeriesStyle {
    pub const VERIFIED: SeriesStyle = SeriesStyle {
        marker: Marker::Circle,
        line: LineKind::Solid,
        color: (31, 119, 180),
    };

    pub const UNVERIFIED: SeriesStyle = SeriesStyle {
        marker: Marker::Square,
        line: LineKind::Dashed,
        color: (255, 127, 14),
    };

    fn rgb(&self) -> RGBColor {
        let (r, g, b) = self.color;
        RGBColor(r, g, b)
    }
}

/// One plotted line: `(num_keys, throughput)` pairs in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    fn from_measurements(label: &str, style: SeriesStyle, rows: &[Measurement]) -> Self {
        Self {
            label: label.to_string(),
            style,
            points: rows.iter().map(Measurement::point).collect(),
        }
    }

    /// Points that can be placed on the given scale. A log axis has no
    /// position for non-positive values, so those are masked.
    pub fn drawable_points(&self, scale: Scale) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(_, y)| !scale.is_log() || *y > 0.0)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub major: bool,
    pub minor: bool,
}

/// Everything needed to draw a throughput chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub scale: Scale,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub grid: Grid,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<Series>,
}

impl ChartModel {
    pub fn build(partitions: &Partitions, scale: Scale) -> Self {
        let series = vec![
            Series::from_measurements(
                "Verified = True",
                SeriesStyle::VERIFIED,
                &partitions.verified_true,
            ),
            Series::from_measurements(
                "Verified = False",
                SeriesStyle::UNVERIFIED,
                &partitions.verified_false,
            ),
        ];

        let points = || series.iter().flat_map(|s| s.points.iter().copied());
        let x_range = padded_range(points().map(|(x, _)| x), 0.0..1.0);
        let y_range = match scale {
            Scale::Linear => padded_range(points().map(|(_, y)| y), 0.0..1.0),
            Scale::Logarithmic => log_range(points().map(|(_, y)| y)),
        };
        debug!(%scale, ?x_range, ?y_range, "computed chart ranges");

        let (title, x_label, y_label, grid) = match scale {
            Scale::Linear => (
                "Throughput vs. Number of Keys by Verification Status",
                "Number of Keys (num_keys)",
                "Throughput (transactions/second)",
                Grid {
                    major: true,
                    minor: false,
                },
            ),
            Scale::Logarithmic => (
                "Throughput vs. Number of Keys",
                "Number of Keys",
                "Throughput (txns/sec) - Log Scale",
                Grid {
                    major: true,
                    minor: true,
                },
            ),
        };

        Self {
            scale,
            title,
            x_label,
            y_label,
            grid,
            x_range,
            y_range,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn padded_range(values: impl Iterator<Item = f64>, fallback: Range<f64>) -> Range<f64> {
    match bounds(values) {
        None => fallback,
        Some((lo, hi)) if lo == hi => {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * RANGE_PADDING };
            (lo - pad)..(hi + pad)
        }
        Some((lo, hi)) => {
            let pad = (hi - lo) * RANGE_PADDING;
            (lo - pad)..(hi + pad)
        }
    }
}

fn log_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match bounds(values.filter(|v| *v > 0.0)) {
        None => 1.0..10.0,
        Some((lo, hi)) if lo == hi => (lo / 2.0)..(hi * 2.0),
        Some((lo, hi)) => {
            let (lo_exp, hi_exp) = (lo.log10(), hi.log10());
            let pad = (hi_exp - lo_exp) * RANGE_PADDING;
            10f64.powf(lo_exp - pad)..10f64.powf(hi_exp + pad)
        }
    }
}

/// Paints `model` onto `area`. The caller owns presenting the backend.
pub fn draw<DB: DrawingBackend>(
    model: &ChartModel,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    area.fill(&WHITE).map_err(draw_error)?;

    let mut builder = ChartBuilder::on(area);
    builder
        .caption(model.title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90);

    match model.scale {
        Scale::Linear => {
            let mut chart = builder
                .build_cartesian_2d(model.x_range.clone(), model.y_range.clone())
                .map_err(draw_error)?;
            draw_contents(&mut chart, model)
        }
        Scale::Logarithmic => {
            let mut chart = builder
                .build_cartesian_2d(model.x_range.clone(), model.y_range.clone().log_scale())
                .map_err(draw_error)?;
            draw_contents(&mut chart, model)
        }
    }
}

/// Legend sample as two segments relative to the entry anchor. A gap between
/// them stands in for the dash pattern.
fn legend_segments(line: LineKind) -> [[(i32, i32); 2]; 2] {
    match line {
        LineKind::Solid => [[(-12, 0), (0, 0)], [(0, 0), (12, 0)]],
        LineKind::Dashed => [[(-12, 0), (-4, 0)], [(4, 0), (12, 0)]],
    }
}

fn draw_contents<'a, DB, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    model: &ChartModel,
) -> Result<(), RenderError>
where
    DB: DrawingBackend + 'a,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(model.x_label)
        .y_desc(model.y_label)
        .axis_desc_style((FONT, 18));
    if !model.grid.major {
        mesh.bold_line_style(WHITE);
    }
    if model.grid.minor {
        mesh.light_line_style(BLACK.mix(0.08));
    } else {
        mesh.light_line_style(WHITE);
    }
    mesh.draw().map_err(draw_error)?;

    for series in &model.series {
        let color = series.style.rgb();
        let line_style = color.stroke_width(LINE_WIDTH);
        let points = series.drawable_points(model.scale);

        let line = match series.style.line {
            LineKind::Solid => chart.draw_series(LineSeries::new(points.clone(), line_style)),
            LineKind::Dashed => {
                chart.draw_series(DashedLineSeries::new(points.clone(), 10, 6, line_style))
            }
        };
        let entry = line.map_err(draw_error)?.label(series.label.clone());
        let [head, tail] = legend_segments(series.style.line);
        match series.style.marker {
            Marker::Circle => entry.legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(head.to_vec(), line_style)
                    + PathElement::new(tail.to_vec(), line_style)
                    + Circle::new((0, 0), MARKER_SIZE, color.filled())
            }),
            Marker::Square => entry.legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(head.to_vec(), line_style)
                    + PathElement::new(tail.to_vec(), line_style)
                    + Rectangle::new(
                        [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                        color.filled(),
                    )
            }),
        };

        let markers = match series.style.marker {
            Marker::Circle => chart.draw_series(
                points
                    .iter()
                    .map(|p| Circle::new(*p, MARKER_SIZE, color.filled())),
            ),
            Marker::Square => chart.draw_series(points.iter().map(|p| {
                EmptyElement::at(*p)
                    + Rectangle::new(
                        [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                        color.filled(),
                    )
            })),
        };
        markers.map_err(draw_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 16))
        .draw()
        .map_err(draw_error)?;

    Ok(())
}
