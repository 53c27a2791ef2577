//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in the binaries and commands.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while parsing a trace log
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read trace log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: usize, value: String },

    #[error("Invalid byte count '{value}' on line {line}")]
    InvalidByteCount { line: usize, value: String },

    #[error("Cumulative byte count overflowed on line {0}")]
    ByteTotalOverflow(usize),
}

/// Errors that can occur while collecting traces
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("File '{name}' is not in the allowed list ({allowed})")]
    DisallowedFile { name: String, allowed: String },

    #[error("Run count must be a positive integer")]
    InvalidRunCount,

    #[error("Cannot find {}. Expected it next to this tool.", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("Cannot create trace directory {}: {source}", path.display())]
    TraceDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to launch collector: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Collector failed on run {run} ({status})")]
    CollectorFailed { run: u32, status: ExitStatus },
}

/// Errors that can occur during chart output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to render chart: {0}")]
    RenderFailed(String),

    #[error("Chart viewer '{program}' failed: {reason}")]
    ViewerFailed { program: String, reason: String },
}
