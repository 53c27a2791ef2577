//! Step chart rendering with plotters.
//!
//! Series are drawn as post-style steps: each cumulative value holds until
//! the next sample's timestamp. Overlays share axes and get a legend.

use super::json::prepare_output_path;
use super::viewer::ChartViewer;
use crate::parser::schema::{LabeledSeries, Series};
use crate::utils::config::chart_dimensions;
use crate::utils::error::OutputError;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
    hexcolour!(0xBCBD22),
    hexcolour!(0x17BECF),
];

/// Chart labels and layout
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub show_legend: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let (width, height) = chart_dimensions();
        Self {
            title: "Received bytes vs. time".to_string(),
            x_label: "Time since first timestamp (s)".to_string(),
            y_label: "Cumulative bytes received".to_string(),
            show_legend: false,
            width,
            height,
        }
    }
}

impl ChartConfig {
    /// Layout for a single trace: no legend
    pub fn single_trace() -> Self {
        Self::default()
    }

    /// Layout for `runs` overlaid traces of `file_name`
    pub fn overlay(file_name: &str, runs: u32) -> Self {
        Self {
            title: format!("{} - {} consecutive traces", file_name, runs),
            x_label: "Time since first byte (s)".to_string(),
            show_legend: true,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Where a finished chart goes
#[derive(Debug, Clone)]
pub enum ChartOutput {
    /// Write the image to this path
    Save(PathBuf),
    /// Open the chart in a viewer and wait for it to exit
    Show(ChartViewer),
}

impl ChartOutput {
    /// Save when a path was given, show otherwise
    pub fn from_path(path: Option<PathBuf>, viewer: ChartViewer) -> Self {
        match path {
            Some(path) => ChartOutput::Save(path),
            None => ChartOutput::Show(viewer),
        }
    }
}

/// Image encoding, picked from the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Bitmap,
    Svg,
}

impl ChartKind {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ChartKind::Svg,
            _ => ChartKind::Bitmap,
        }
    }
}

/// Render a chart and send it to the requested output
///
/// **Public** - main entry point for chart output
pub fn emit_chart(
    series: &[LabeledSeries],
    config: &ChartConfig,
    output: &ChartOutput,
) -> Result<(), OutputError> {
    match output {
        ChartOutput::Save(path) => render_chart(series, config, path),
        ChartOutput::Show(viewer) => viewer.show(series, config),
    }
}

/// Render a chart to an image file, creating parent directories
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::RenderFailed` - plotters failed to draw or encode the image
pub fn render_chart(
    series: &[LabeledSeries],
    config: &ChartConfig,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Rendering chart to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let size = (config.width, config.height);
    match ChartKind::for_path(output_path) {
        ChartKind::Bitmap => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_chart(&root, series, config)
                .and_then(|_| root.present())
                .map_err(|e| OutputError::RenderFailed(e.to_string()))?;
        }
        ChartKind::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_chart(&root, series, config)
                .and_then(|_| root.present())
                .map_err(|e| OutputError::RenderFailed(e.to_string()))?;
        }
    }

    debug!("Chart rendered ({}x{})", config.width, config.height);
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[LabeledSeries],
    config: &ChartConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(series.iter().map(|s| &s.series));

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .y_label_formatter(&|v| format!("{:.0}", v))
        .bold_line_style(BLACK.mix(0.2))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for (index, labeled) in series.iter().enumerate() {
        let colour = COLOURS[index % COLOURS.len()];
        let anno = chart.draw_series(LineSeries::new(
            post_step_points(&labeled.series),
            colour.mix(0.75).stroke_width(2),
        ))?;

        if config.show_legend {
            anno.label(labeled.label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
            });
        }
    }

    if config.show_legend && !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.4))
            .draw()?;
    }

    Ok(())
}

/// Expand samples into the vertices of a post-style step line
///
/// `[(t0, y0), (t1, y1)]` becomes `[(t0, y0), (t1, y0), (t1, y1)]`.
pub fn post_step_points(series: &Series) -> Vec<(f64, f64)> {
    let samples = series.samples();
    let mut points = Vec::with_capacity(samples.len() * 2);

    for (i, sample) in samples.iter().enumerate() {
        let value = sample.cumulative_bytes as f64;
        if i > 0 {
            let previous = samples[i - 1].cumulative_bytes as f64;
            points.push((sample.elapsed_secs, previous));
        }
        points.push((sample.elapsed_secs, value));
    }

    points
}

/// Shared axis ranges covering every series, never degenerate
fn axis_ranges<'a>(series: impl Iterator<Item = &'a Series>) -> (Range<f64>, Range<f64>) {
    let mut x_min = 0.0_f64;
    let mut x_max = 0.0_f64;
    let mut y_max = 0.0_f64;

    for sample in series.flat_map(|s| s.samples()) {
        x_min = x_min.min(sample.elapsed_secs);
        x_max = x_max.max(sample.elapsed_secs);
        y_max = y_max.max(sample.cumulative_bytes as f64);
    }

    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let x_pad = (x_max - x_min) * 0.02;
    (x_min..x_max + x_pad, 0.0..y_max * 1.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::TraceEvent;
    use pretty_assertions::assert_eq;

    fn series_of(events: &[(f64, u64)]) -> Series {
        let mut series = Series::new();
        series.push_anchor();
        for &(elapsed_secs, bytes) in events {
            series.record(TraceEvent { elapsed_secs, bytes });
        }
        series
    }

    #[test]
    fn test_post_step_points() {
        let series = series_of(&[(0.5, 1024), (1.5, 1024)]);
        assert_eq!(
            post_step_points(&series),
            vec![
                (0.0, 0.0),
                (0.5, 0.0),
                (0.5, 1024.0),
                (1.5, 1024.0),
                (1.5, 2048.0),
            ]
        );
    }

    #[test]
    fn test_post_step_points_empty() {
        assert!(post_step_points(&Series::new()).is_empty());
    }

    #[test]
    fn test_axis_ranges_empty() {
        let (x, y) = axis_ranges(std::iter::empty());
        assert!(x.end > x.start);
        assert!(y.end > y.start);
    }

    #[test]
    fn test_axis_ranges_cover_all_series() {
        let a = series_of(&[(2.0, 100)]);
        let b = series_of(&[(1.0, 500)]);
        let (x, y) = axis_ranges([&a, &b].into_iter());

        assert_eq!(x.start, 0.0);
        assert!(x.end >= 2.0);
        assert!(y.end >= 500.0);
    }

    #[test]
    fn test_axis_ranges_negative_elapsed() {
        let a = series_of(&[(-86399.8, 10)]);
        let (x, _) = axis_ranges(std::iter::once(&a));
        assert_eq!(x.start, -86399.8);
        assert!(x.end > 0.0);
    }

    #[test]
    fn test_chart_kind_for_path() {
        assert_eq!(ChartKind::for_path(Path::new("out.png")), ChartKind::Bitmap);
        assert_eq!(ChartKind::for_path(Path::new("out.SVG")), ChartKind::Svg);
        assert_eq!(ChartKind::for_path(Path::new("out")), ChartKind::Bitmap);
    }

    #[test]
    fn test_overlay_config() {
        let config = ChartConfig::overlay("1M.bin", 3);
        assert_eq!(config.title, "1M.bin - 3 consecutive traces");
        assert!(config.show_legend);
        assert!(!ChartConfig::single_trace().show_legend);
    }
}
