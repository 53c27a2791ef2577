//! Parsed series data structures.
//!
//! A [`Series`] is what one trace log boils down to: a list of
//! (elapsed seconds, cumulative bytes) samples. It is serializable so the
//! tools can export it next to the chart.

use serde::{Deserialize, Serialize};

/// A single `Recv data` event, relative to the log's anchor timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEvent {
    /// Seconds since the anchor timestamp (negative if the log crosses midnight)
    pub elapsed_secs: f64,

    /// Bytes received in this event
    pub bytes: u64,
}

/// One point of a cumulative series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub elapsed_secs: f64,
    pub cumulative_bytes: u64,
}

impl Sample {
    pub fn new(elapsed_secs: f64, cumulative_bytes: u64) -> Self {
        Self {
            elapsed_secs,
            cumulative_bytes,
        }
    }
}

/// Cumulative received bytes over time for one trace log
///
/// Starts with a `(0, 0)` anchor sample once the first timestamp is seen.
/// A series with no samples means the log never contained a timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the `(0, 0)` sample for the anchor timestamp
    pub fn push_anchor(&mut self) {
        self.samples.push(Sample::new(0.0, 0));
    }

    /// Add an event to the running total and append the resulting sample
    ///
    /// Returns the new cumulative total, or `None` if it would overflow.
    pub fn record(&mut self, event: TraceEvent) -> Option<u64> {
        let total = self.total_bytes().checked_add(event.bytes)?;
        self.samples.push(Sample::new(event.elapsed_secs, total));
        Some(total)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Cumulative bytes at the last sample (0 for an empty series)
    pub fn total_bytes(&self) -> u64 {
        self.samples.last().map_or(0, |s| s.cumulative_bytes)
    }

    /// Elapsed time of the last sample (0 for an empty series)
    pub fn duration_secs(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.elapsed_secs)
    }

    /// One-line description used in log output
    pub fn summary(&self) -> String {
        format!(
            "{} samples, {} bytes over {:.3}s",
            self.len(),
            self.total_bytes(),
            self.duration_secs()
        )
    }
}

/// A series paired with its legend label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub label: String,
    pub series: Series,
}

impl LabeledSeries {
    pub fn new(label: impl Into<String>, series: Series) -> Self {
        Self {
            label: label.into(),
            series,
        }
    }
}
