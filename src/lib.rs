//! Curl Trace Plot
//!
//! Cumulative received-bytes charts from `curl --trace-time` logs.
//!
//! This crate provides the core implementation for two CLI tools:
//!
//! - `plotter <logfile> [outfile.png]` plots one existing trace log
//! - `overlay_runner <FILE> <N> [outfile.png]` collects N traces through
//!   `trace.sh` and overlays them on one chart
//!
//! ## Library usage
//!
//! ```ignore
//! use curl_trace_plot::parser::{parse_log_file, ParseOptions};
//!
//! let series = parse_log_file("traces/1M.bin_1.log", &ParseOptions::multi_run())?;
//! println!("{}", series.summary());
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod runner;
pub mod utils;
