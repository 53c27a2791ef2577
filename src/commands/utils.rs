use crate::output::{emit_chart, write_series_json, ChartConfig, ChartOutput};
use crate::parser::LabeledSeries;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Log a one-line summary per series
pub fn log_series_summaries(series: &[LabeledSeries]) {
    for labeled in series {
        if labeled.series.is_empty() {
            info!("{}: no timestamped lines, chart will be empty", labeled.label);
        } else {
            info!("{}: {}", labeled.label, labeled.series.summary());
        }
    }
}

/// Write the optional JSON export, then the chart
///
/// Prints the image path when the chart was saved.
pub fn write_outputs(
    series: &[LabeledSeries],
    config: &ChartConfig,
    output: &ChartOutput,
    json: Option<&Path>,
) -> Result<()> {
    if let Some(json_path) = json {
        write_series_json(series, json_path).context("Failed to write series JSON")?;
        info!("✓ Series written to: {}", json_path.display());
    }

    emit_chart(series, config, output).context("Failed to produce chart")?;

    if let ChartOutput::Save(path) = output {
        println!("Plot written to {}", path.display());
    }

    Ok(())
}
