//! Multi-run overlay command.
//!
//! The overlay command:
//! 1. Collects N traces through the collector script, one after another
//! 2. Parses each log (lossy UTF-8, whole file)
//! 3. Overlays every series on one chart, labeled "trace 1".."trace N"

use super::models::OverlayArgs;
use super::utils::{log_series_summaries, write_outputs};
use crate::output::{ChartConfig, ChartOutput};
use crate::parser::{parse_log_file, LabeledSeries, ParseOptions};
use crate::runner::{validate_file_name, RunIdentity, TraceCollector};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

impl OverlayArgs {
    /// Collector configured from these arguments
    pub fn collector(&self) -> TraceCollector {
        TraceCollector::new(&self.script)
            .with_trace_dir(&self.trace_dir)
            .with_shell(self.shell.as_str())
    }
}

/// Validate overlay arguments
///
/// **Public** - must pass before any trace is collected
pub fn validate_overlay_args(args: &OverlayArgs) -> Result<()> {
    if args.runs == 0 {
        anyhow::bail!("<N> must be a positive integer");
    }

    validate_file_name(&args.file_name)?;
    args.collector().ensure_script_exists()?;

    Ok(())
}

/// Collect every run and parse the resulting logs
///
/// **Public** - everything [`execute_overlay`] does except drawing
pub fn collect_series(args: &OverlayArgs) -> Result<Vec<LabeledSeries>> {
    info!("Step 1/3: Collecting {} trace(s) of {}...", args.runs, args.file_name);
    let logs: Vec<PathBuf> = args
        .collector()
        .collect(&args.file_name, args.runs)
        .context("Trace collection aborted")?;

    info!("Step 2/3: Parsing {} log(s)...", logs.len());
    let options = ParseOptions::multi_run();
    let series = logs
        .iter()
        .zip(1..)
        .map(|(log, index)| {
            let run = RunIdentity::new(args.file_name.as_str(), index);
            parse_log_file(log, &options)
                .map(|series| LabeledSeries::new(run.label(), series))
                .with_context(|| format!("Failed to parse {}", log.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    log_series_summaries(&series);
    Ok(series)
}

/// Execute the overlay command
///
/// **Public** - main entry point called from the `overlay_runner` binary
pub fn execute_overlay(args: OverlayArgs) -> Result<()> {
    let start_time = Instant::now();

    validate_overlay_args(&args)?;
    let series = collect_series(&args)?;

    info!("Step 3/3: Plotting overlay...");
    let mut config = ChartConfig::overlay(&args.file_name, args.runs);
    if let Some(title) = &args.title {
        config = config.with_title(title.as_str());
    }
    let output = ChartOutput::from_path(args.output.clone(), args.viewer.clone());
    write_outputs(&series, &config, &output, args.json.as_deref())?;

    info!("Done in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
