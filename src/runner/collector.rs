//! Collector process invocation.

use crate::utils::config::{
    is_allowed_file, ALLOWED_FILES, DEFAULT_SHELL, DEFAULT_TRACE_DIR, DEFAULT_TRACE_SCRIPT,
};
use crate::utils::error::RunnerError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Identifies one collected trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    pub file_name: String,
    /// 1-based
    pub run_index: u32,
}

impl RunIdentity {
    pub fn new(file_name: impl Into<String>, run_index: u32) -> Self {
        Self {
            file_name: file_name.into(),
            run_index,
        }
    }

    /// `{trace_dir}/{file_name}_{run_index}.log`
    pub fn log_path(&self, trace_dir: &Path) -> PathBuf {
        trace_dir.join(format!("{}_{}.log", self.file_name, self.run_index))
    }

    /// Legend label for this run
    pub fn label(&self) -> String {
        format!("trace {}", self.run_index)
    }
}

/// Check a download target against the allow-list
///
/// **Public** - called during argument validation, before any work
pub fn validate_file_name(file_name: &str) -> Result<(), RunnerError> {
    if is_allowed_file(file_name) {
        return Ok(());
    }

    let mut allowed: Vec<&str> = ALLOWED_FILES.to_vec();
    allowed.sort_unstable();
    Err(RunnerError::DisallowedFile {
        name: file_name.to_string(),
        allowed: allowed.join(", "),
    })
}

/// Runs the collector script once per requested trace
#[derive(Debug, Clone)]
pub struct TraceCollector {
    pub script: PathBuf,
    pub trace_dir: PathBuf,
    pub shell: String,
}

impl Default for TraceCollector {
    fn default() -> Self {
        Self {
            script: PathBuf::from(DEFAULT_TRACE_SCRIPT),
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl TraceCollector {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }

    pub fn with_trace_dir(mut self, trace_dir: impl Into<PathBuf>) -> Self {
        self.trace_dir = trace_dir.into();
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Fail early if the script is missing
    pub fn ensure_script_exists(&self) -> Result<(), RunnerError> {
        if self.script.is_file() {
            Ok(())
        } else {
            Err(RunnerError::ScriptNotFound(self.script.clone()))
        }
    }

    /// Collect a single trace and return its log path
    ///
    /// **Public** - blocks until the collector exits
    ///
    /// # Errors
    /// * `RunnerError::TraceDir` - trace directory cannot be created
    /// * `RunnerError::Spawn` - collector could not be started
    /// * `RunnerError::CollectorFailed` - collector exited unsuccessfully
    pub fn run(&self, run: &RunIdentity) -> Result<PathBuf, RunnerError> {
        let log_path = run.log_path(&self.trace_dir);

        std::fs::create_dir_all(&self.trace_dir).map_err(|source| RunnerError::TraceDir {
            path: self.trace_dir.clone(),
            source,
        })?;

        info!(
            "Collecting run {}: {} -> {}",
            run.run_index,
            run.file_name,
            log_path.display()
        );

        let status = Command::new(&self.shell)
            .arg(&self.script)
            .arg(&run.file_name)
            .arg(&log_path)
            .status()?;

        if !status.success() {
            return Err(RunnerError::CollectorFailed {
                run: run.run_index,
                status,
            });
        }

        debug!("Run {} finished ({})", run.run_index, status);
        Ok(log_path)
    }

    /// Collect `runs` traces in order, stopping at the first failure
    ///
    /// Logs written by earlier successful runs are left in place.
    pub fn collect(&self, file_name: &str, runs: u32) -> Result<Vec<PathBuf>, RunnerError> {
        if runs == 0 {
            return Err(RunnerError::InvalidRunCount);
        }
        validate_file_name(file_name)?;

        (1..=runs)
            .map(|index| self.run(&RunIdentity::new(file_name, index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path() {
        let run = RunIdentity::new("1M.bin", 3);
        assert_eq!(
            run.log_path(Path::new("traces")),
            PathBuf::from("traces/1M.bin_3.log")
        );
        assert_eq!(run.label(), "trace 3");
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("1K.bin").is_ok());

        let err = validate_file_name("5M.bin").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("5M.bin"));
        assert!(message.contains("1G.bin, 1K.bin, 1M.bin"));
    }

    #[test]
    fn test_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let collector = TraceCollector::new(dir.path().join("trace.sh"));
        assert!(matches!(
            collector.ensure_script_exists(),
            Err(RunnerError::ScriptNotFound(_))
        ));
    }

    #[test]
    fn test_collect_zero_runs() {
        let collector = TraceCollector::default();
        assert!(matches!(
            collector.collect("1K.bin", 0),
            Err(RunnerError::InvalidRunCount)
        ));
    }
}
