//! Trace collection through the external `trace.sh` script.
//!
//! Runs are strictly sequential: each one waits for the collector to exit
//! before the next starts, so bandwidth measurements never overlap.

pub mod collector;

pub use collector::{validate_file_name, RunIdentity, TraceCollector};
