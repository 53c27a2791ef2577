use crate::output::ChartViewer;
use crate::utils::config::{
    DEFAULT_SHELL, DEFAULT_TRACE_DIR, DEFAULT_TRACE_SCRIPT, EARLY_STOP_BYTES,
};
use std::path::PathBuf;

/// Arguments for the single-trace plot command
///
/// **Public** - built by the `plotter` binary from CLI args
#[derive(Debug, Clone)]
pub struct PlotArgs {
    /// Trace log to plot
    pub log_file: PathBuf,

    /// Image path; `None` opens the chart in a viewer
    pub output: Option<PathBuf>,

    /// Stop parsing once this many bytes have been seen (None = whole file)
    pub byte_limit: Option<u64>,

    /// Chart title override
    pub title: Option<String>,

    /// Optional JSON export of the parsed series
    pub json: Option<PathBuf>,

    /// Viewer used when no output path is given
    pub viewer: ChartViewer,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            log_file: PathBuf::new(),
            output: None,
            byte_limit: Some(EARLY_STOP_BYTES),
            title: None,
            json: None,
            viewer: ChartViewer::platform_default(),
        }
    }
}

/// Arguments for the multi-run overlay command
///
/// **Public** - built by the `overlay_runner` binary from CLI args
#[derive(Debug, Clone)]
pub struct OverlayArgs {
    /// Download target, must be in the allow-list
    pub file_name: String,

    /// Number of consecutive traces to collect
    pub runs: u32,

    /// Image path; `None` opens the chart in a viewer
    pub output: Option<PathBuf>,

    /// Collector script
    pub script: PathBuf,

    /// Directory for collected logs
    pub trace_dir: PathBuf,

    /// Interpreter for the collector script
    pub shell: String,

    /// Chart title override
    pub title: Option<String>,

    /// Optional JSON export of every parsed series
    pub json: Option<PathBuf>,

    /// Viewer used when no output path is given
    pub viewer: ChartViewer,
}

impl Default for OverlayArgs {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            runs: 1,
            output: None,
            script: PathBuf::from(DEFAULT_TRACE_SCRIPT),
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            shell: DEFAULT_SHELL.to_string(),
            title: None,
            json: None,
            viewer: ChartViewer::platform_default(),
        }
    }
}
