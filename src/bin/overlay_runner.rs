//! Multi-run overlay
//!
//! Collects several consecutive curl traces through `trace.sh` and overlays
//! them on one cumulative-bytes-vs-time chart.

use anyhow::Result;
use clap::Parser;
use curl_trace_plot::commands::{execute_overlay, OverlayArgs};
use curl_trace_plot::output::ChartViewer;
use curl_trace_plot::utils::config::{DEFAULT_SHELL, DEFAULT_TRACE_DIR, DEFAULT_TRACE_SCRIPT};
use env_logger::Env;
use std::path::PathBuf;

/// Collect N curl traces and overlay them on one chart
#[derive(Parser, Debug)]
#[command(name = "overlay_runner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Object to download (1K.bin, 1M.bin or 1G.bin)
    file: String,

    /// How many consecutive traces to collect
    runs: u32,

    /// Save the chart here instead of opening a viewer
    outfile: Option<PathBuf>,

    /// Collector script, invoked as `<shell> <script> <FILE> <logfile>`
    #[arg(long, env = "TRACE_SCRIPT", default_value = DEFAULT_TRACE_SCRIPT)]
    script: PathBuf,

    /// Directory the collected logs are written to
    #[arg(long, env = "TRACE_DIR", default_value = DEFAULT_TRACE_DIR)]
    trace_dir: PathBuf,

    /// Interpreter for the collector script
    #[arg(long, default_value = DEFAULT_SHELL)]
    shell: String,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Also write every parsed series as JSON
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

    let args = OverlayArgs {
        file_name: cli.file,
        runs: cli.runs,
        output: cli.outfile,
        script: cli.script,
        trace_dir: cli.trace_dir,
        shell: cli.shell,
        title: cli.title,
        json: cli.json,
        viewer: cli
            .viewer
            .as_deref()
            .and_then(ChartViewer::from_command_line)
            .unwrap_or_default(),
    };

    // Validates before any trace is collected
    execute_overlay(args)?;

    Ok(())
}
