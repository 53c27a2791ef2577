//! Single-trace plotter
//!
//! Plots cumulative bytes received vs. time from one curl trace log.

use anyhow::Result;
use clap::Parser;
use curl_trace_plot::commands::{execute_plot, validate_plot_args, PlotArgs};
use curl_trace_plot::output::ChartViewer;
use curl_trace_plot::utils::config::EARLY_STOP_BYTES;
use env_logger::Env;
use std::path::PathBuf;

/// Plot received bytes vs. time from a curl trace log
#[derive(Parser, Debug)]
#[command(name = "plotter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace log written by curl --trace-time
    logfile: PathBuf,

    /// Save the chart here instead of opening a viewer
    outfile: Option<PathBuf>,

    /// Read the whole log instead of stopping after 12 MiB
    #[arg(long)]
    no_limit: bool,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Also write the parsed series as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Command used to open the chart when no outfile is given
    #[arg(long, env = "TRACE_PLOT_VIEWER")]
    viewer: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = PlotArgs {
        log_file: cli.logfile,
        output: cli.outfile,
        byte_limit: (!cli.no_limit).then_some(EARLY_STOP_BYTES),
        title: cli.title,
        json: cli.json,
        viewer: cli
            .viewer
            .as_deref()
            .and_then(ChartViewer::from_command_line)
            .unwrap_or_default(),
    };

    validate_plot_args(&args)?;
    execute_plot(args)?;

    Ok(())
}
