//! Single-trace plot command.
//!
//! The plot command:
//! 1. Parses one trace log (strict UTF-8, early stop at 12 MiB by default)
//! 2. Renders the cumulative series as a step chart
//! 3. Saves it or opens it in a viewer

use super::models::PlotArgs;
use super::utils::{log_series_summaries, write_outputs};
use crate::output::{ChartConfig, ChartOutput};
use crate::parser::{parse_log_file, LabeledSeries, ParseOptions, Series};
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Validate plot arguments
///
/// **Public** - call before [`execute_plot`] so usage errors surface before any work
pub fn validate_plot_args(args: &PlotArgs) -> Result<()> {
    if args.log_file.as_os_str().is_empty() {
        anyhow::bail!("Usage: plotter <logfile> [outfile.png]");
    }

    if !args.log_file.is_file() {
        anyhow::bail!("Log file not found: {}", args.log_file.display());
    }

    Ok(())
}

/// Parse the log named in `args`
///
/// **Public** - the parsing half of [`execute_plot`]
pub fn load_series(args: &PlotArgs) -> Result<Series> {
    let options = ParseOptions::single_trace().with_byte_limit(args.byte_limit);
    parse_log_file(&args.log_file, &options)
        .with_context(|| format!("Failed to parse {}", args.log_file.display()))
}

/// Execute the plot command
///
/// **Public** - main entry point called from the `plotter` binary
pub fn execute_plot(args: PlotArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/2: Parsing {}...", args.log_file.display());
    let series = vec![LabeledSeries::new(
        args.log_file.display().to_string(),
        load_series(&args)?,
    )];
    log_series_summaries(&series);

    info!("Step 2/2: Plotting...");
    let mut config = ChartConfig::single_trace();
    if let Some(title) = &args.title {
        config = config.with_title(title.as_str());
    }
    let output = ChartOutput::from_path(args.output.clone(), args.viewer.clone());
    write_outputs(&series, &config, &output, args.json.as_deref())?;

    info!("Done in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
