//! Interactive chart display.
//!
//! plotters only draws to files, so "showing" a chart means rendering it to
//! a scratch PNG and handing that to an external viewer, then waiting for
//! the viewer process to exit.

use super::chart::{render_chart, ChartConfig};
use crate::parser::schema::LabeledSeries;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// External program used to open a rendered chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartViewer {
    pub program: String,
    /// Arguments placed before the image path
    pub args: Vec<String>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl ChartViewer {
    /// The desktop's default image opener
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open", ["-W"])
        } else if cfg!(target_os = "windows") {
            Self::new("cmd", ["/C", "start", "/WAIT", ""])
        } else {
            Self::new("xdg-open", [] as [&str; 0])
        }
    }

    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace-separated command line such as `"feh --scale-down"`
    ///
    /// Returns `None` for a blank command.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    /// Render the chart to a scratch file and open it, blocking until the viewer exits
    ///
    /// The scratch file is removed once the viewer exits, or straight away if
    /// rendering fails. Openers that hand the file to another process and
    /// return at once (`xdg-open`) get a scratch file that outlives the call.
    pub fn show(&self, series: &[LabeledSeries], config: &ChartConfig) -> Result<(), OutputError> {
        let scratch = tempfile::Builder::new()
            .prefix("curl-trace-plot-")
            .suffix(".png")
            .tempfile()?
            .into_temp_path();

        render_chart(series, config, &scratch)?;
        info!("Opening chart with {}: {}", self.program, scratch.display());

        if self.returns_early() {
            let path = scratch.keep().map_err(|e| OutputError::WriteFailed(e.error))?;
            debug!("Keeping scratch chart {}", path.display());
            return self.open(&path);
        }

        self.open(&scratch)
    }

    /// Whether the program exits before the image has been read
    fn returns_early(&self) -> bool {
        Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == "xdg-open")
    }

    fn open(&self, image: &Path) -> Result<(), OutputError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .status()
            .map_err(|e| OutputError::ViewerFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(OutputError::ViewerFailed {
                program: self.program.clone(),
                reason: status.to_string(),
            });
        }

        debug!("Viewer exited ({})", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let viewer = ChartViewer::from_command_line("feh  --scale-down").unwrap();
        assert_eq!(viewer.program, "feh");
        assert_eq!(viewer.args, vec!["--scale-down".to_string()]);
    }

    #[test]
    fn test_from_blank_command_line() {
        assert_eq!(ChartViewer::from_command_line("   "), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_open_reports_failure_status() {
        let viewer = ChartViewer::new("false", [] as [&str; 0]);
        let err = viewer.open(Path::new("chart.png")).unwrap_err();
        assert!(matches!(err, OutputError::ViewerFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_waits_for_viewer() {
        let viewer = ChartViewer::new("true", [] as [&str; 0]);
        assert!(viewer.open(Path::new("chart.png")).is_ok());
    }

    #[test]
    fn test_returns_early() {
        assert!(ChartViewer::new("xdg-open", [] as [&str; 0]).returns_early());
        assert!(ChartViewer::new("/usr/bin/xdg-open", [] as [&str; 0]).returns_early());
        assert!(!ChartViewer::new("open", ["-W"]).returns_early());
        assert!(!ChartViewer::new("feh", [] as [&str; 0]).returns_early());
    }

    #[cfg(unix)]
    #[test]
    fn test_show_removes_scratch_after_viewer_exits() {
        use crate::parser::schema::Series;

        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("opened.txt");
        let script = format!("echo \"$0\" > '{}'", record.display());
        let viewer = ChartViewer::new("sh", ["-c", script.as_str()]);

        let series = vec![LabeledSeries::new("trace", Series::new())];
        viewer.show(&series, &ChartConfig::single_trace()).unwrap();

        let opened = std::fs::read_to_string(&record).unwrap();
        let opened = Path::new(opened.trim());
        assert!(opened.extension().is_some_and(|ext| ext == "png"));
        assert!(!opened.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_show_removes_scratch_when_viewer_fails() {
        use crate::parser::schema::Series;

        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("opened.txt");
        let script = format!("echo \"$0\" > '{}'; exit 1", record.display());
        let viewer = ChartViewer::new("sh", ["-c", script.as_str()]);

        let series = vec![LabeledSeries::new("trace", Series::new())];
        let err = viewer.show(&series, &ChartConfig::single_trace()).unwrap_err();
        assert!(matches!(err, OutputError::ViewerFailed { .. }));

        let opened = std::fs::read_to_string(&record).unwrap();
        assert!(!Path::new(opened.trim()).exists());
    }

    #[test]
    fn test_open_missing_program() {
        let viewer = ChartViewer::new("definitely-not-a-real-viewer-binary", [] as [&str; 0]);
        assert!(viewer.open(Path::new("chart.png")).is_err());
    }
}
