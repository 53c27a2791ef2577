//! Parser for curl `--trace-time` logs.
//!
//! Every line is classified once. The first timestamped line anchors
//! elapsed time at zero; every `<= Recv data, N bytes` line after that adds
//! a sample to the cumulative series.

use super::schema::{Series, TraceEvent};
use crate::utils::config::EARLY_STOP_BYTES;
use crate::utils::error::ParseError;
use chrono::{NaiveTime, Timelike};
use log::{debug, warn};
use regex::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.6f";

fn timestamp_re() -> &'static Regex {
    static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_RE.get_or_init(|| {
        Regex::new(r"^(?P<ts>[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{6})")
            .expect("valid timestamp regex")
    })
}

fn recv_data_re() -> &'static Regex {
    static RECV_DATA_RE: OnceLock<Regex> = OnceLock::new();
    RECV_DATA_RE.get_or_init(|| {
        Regex::new(
            r"^(?P<ts>[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{6})\s+<=\s+Recv data,\s+(?P<bytes>[0-9]+)\s+bytes",
        )
        .expect("valid recv data regex")
    })
}

/// How a single log line is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// No leading timestamp
    Irrelevant,
    /// Leading timestamp, but not a data line
    Timestamped { ts: &'a str },
    /// `<= Recv data` line
    Received { ts: &'a str, bytes: &'a str },
}

impl<'a> LineKind<'a> {
    fn timestamp(&self) -> Option<&'a str> {
        match *self {
            LineKind::Irrelevant => None,
            LineKind::Timestamped { ts } | LineKind::Received { ts, .. } => Some(ts),
        }
    }
}

fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(caps) = recv_data_re().captures(line) {
        if let (Some(ts), Some(bytes)) = (caps.name("ts"), caps.name("bytes")) {
            return LineKind::Received {
                ts: ts.as_str(),
                bytes: bytes.as_str(),
            };
        }
    }

    match timestamp_re().captures(line).and_then(|caps| caps.name("ts")) {
        Some(ts) => LineKind::Timestamped { ts: ts.as_str() },
        None => LineKind::Irrelevant,
    }
}

fn parse_timestamp(value: &str, line: usize) -> Result<NaiveTime, ParseError> {
    let invalid = || ParseError::InvalidTimestamp {
        line,
        value: value.to_string(),
    };

    let time = NaiveTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    // chrono reads second 60 as a leap second; trace clocks never emit one
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(time)
}

/// Decode a line, dropping invalid UTF-8 sequences
fn decode_ignoring_invalid(mut bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut text = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                bytes = match e.error_len() {
                    Some(len) => &rest[len..],
                    None => &[],
                };
            }
        }
    }
    Cow::Owned(text)
}

/// Text decoding policy for log files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    /// Invalid UTF-8 is an error
    Strict,
    /// Invalid UTF-8 sequences are dropped and parsing continues
    Lossy,
}

/// Options controlling a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Stop once the cumulative total exceeds this many bytes
    pub byte_limit: Option<u64>,
    pub decoding: Decoding,
}

impl ParseOptions {
    /// Single-trace plotting: strict UTF-8, stop after 12 MiB
    pub fn single_trace() -> Self {
        Self {
            byte_limit: Some(EARLY_STOP_BYTES),
            decoding: Decoding::Strict,
        }
    }

    /// Multi-run overlay: lossy decoding, whole file
    pub fn multi_run() -> Self {
        Self {
            byte_limit: None,
            decoding: Decoding::Lossy,
        }
    }

    pub fn with_byte_limit(mut self, byte_limit: Option<u64>) -> Self {
        self.byte_limit = byte_limit;
        self
    }
}

/// Whether the caller should keep feeding lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy)]
enum ParserState {
    AwaitingAnchor,
    Anchored { t0: NaiveTime },
}

/// Line-at-a-time trace parser
///
/// **Public** - use [`parse_reader`] or [`parse_log_file`] unless lines come
/// from somewhere other than a reader.
#[derive(Debug)]
pub struct LogParser {
    state: ParserState,
    series: Series,
    byte_limit: Option<u64>,
    line_number: usize,
}

impl LogParser {
    pub fn new(byte_limit: Option<u64>) -> Self {
        Self {
            state: ParserState::AwaitingAnchor,
            series: Series::new(),
            byte_limit,
            line_number: 0,
        }
    }

    /// Process the next line of the log
    ///
    /// # Errors
    /// * `ParseError::InvalidTimestamp` - timestamp matched the pattern but is not a valid time
    /// * `ParseError::InvalidByteCount` - byte count does not fit in a u64
    /// * `ParseError::ByteTotalOverflow` - running total does not fit in a u64
    pub fn feed(&mut self, line: &str) -> Result<Flow, ParseError> {
        self.line_number += 1;
        let kind = classify_line(line);

        if let ParserState::AwaitingAnchor = self.state {
            if let Some(ts) = kind.timestamp() {
                let t0 = parse_timestamp(ts, self.line_number)?;
                debug!("Anchored at {} (line {})", ts, self.line_number);
                self.state = ParserState::Anchored { t0 };
                self.series.push_anchor();
            }
        }

        let LineKind::Received { ts, bytes } = kind else {
            return Ok(Flow::Continue);
        };
        let ParserState::Anchored { t0 } = self.state else {
            return Ok(Flow::Continue);
        };

        let event = TraceEvent {
            elapsed_secs: elapsed_secs(t0, parse_timestamp(ts, self.line_number)?),
            bytes: bytes.parse().map_err(|_| ParseError::InvalidByteCount {
                line: self.line_number,
                value: bytes.to_string(),
            })?,
        };

        let total = self
            .series
            .record(event)
            .ok_or(ParseError::ByteTotalOverflow(self.line_number))?;

        match self.byte_limit {
            Some(limit) if total > limit => {
                debug!(
                    "Byte limit {} exceeded at line {} ({} bytes), stopping",
                    limit, self.line_number, total
                );
                Ok(Flow::Stop)
            }
            _ => Ok(Flow::Continue),
        }
    }

    /// Consume the parser and return the series built so far
    pub fn finish(self) -> Series {
        if matches!(self.state, ParserState::AwaitingAnchor) {
            warn!("No timestamped line found in {} lines", self.line_number);
        }
        self.series
    }
}

fn elapsed_secs(t0: NaiveTime, ts: NaiveTime) -> f64 {
    // No day rollover handling: a log crossing midnight goes negative
    let delta = ts.signed_duration_since(t0);
    delta.num_microseconds().unwrap_or_default() as f64 / 1_000_000.0
}

/// Parse already-decoded lines
pub fn parse_lines<'a, I>(lines: I, byte_limit: Option<u64>) -> Result<Series, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = LogParser::new(byte_limit);
    for line in lines {
        if parser.feed(line)? == Flow::Stop {
            break;
        }
    }
    Ok(parser.finish())
}

/// Parse a trace log from a reader
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::Io` - read failure, or invalid UTF-8 under [`Decoding::Strict`]
/// * Any error from [`LogParser::feed`]
pub fn parse_reader<R: BufRead>(mut reader: R, options: &ParseOptions) -> Result<Series, ParseError> {
    let mut parser = LogParser::new(options.byte_limit);

    match options.decoding {
        Decoding::Strict => {
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line)? == 0 {
                    break;
                }
                if parser.feed(&line)? == Flow::Stop {
                    break;
                }
            }
        }
        Decoding::Lossy => {
            let mut buf = Vec::new();
            loop {
                buf.clear();
                if reader.read_until(b'\n', &mut buf)? == 0 {
                    break;
                }
                if parser.feed(&decode_ignoring_invalid(&buf))? == Flow::Stop {
                    break;
                }
            }
        }
    }

    Ok(parser.finish())
}

/// Parse a trace log file
///
/// The file handle is dropped as soon as parsing finishes.
pub fn parse_log_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Series, ParseError> {
    let path = path.as_ref();
    debug!("Parsing trace log: {}", path.display());

    let file = File::open(path)?;
    let series = parse_reader(BufReader::new(file), options)?;

    debug!("Parsed {}: {}", path.display(), series.summary());
    Ok(series)
}
