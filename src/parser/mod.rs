//! Trace log parsing and series definitions.
//!
//! This module handles:
//! - Classifying curl trace lines (timestamped / `Recv data`)
//! - Anchoring elapsed time at the first timestamp
//! - Accumulating received bytes into a [`Series`]

pub mod curl_trace;
pub mod schema;

// Re-export main types
pub use curl_trace::{
    parse_lines, parse_log_file, parse_reader, Decoding, Flow, LogParser, ParseOptions,
};
pub use schema::{LabeledSeries, Sample, Series, TraceEvent};
