//! Reader for the simulator's textual scheduling trace.
//!
//! Layout after an arbitrary preamble:
//!
//! ```text
//! SimulationTime ...
//! E 100 id 7 id 9 id 200
//! #dispatch
//! #main
//!
//! E 150 id 9 id 11 id 400
//! ...
//! ```
//!
//! Each record is a header line (integers at token positions 1, 3, 5, 7),
//! zero or more `#` frame lines printed innermost first, and a blank
//! separator line.

use super::schema::{Event, NodeId};
use crate::utils::config::{HEADER_FIELD_POSITIONS, MIN_HEADER_TOKENS, TraceSettings};
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::iter::{Enumerate, Peekable};
use std::path::Path;
use std::str::Lines;

type LineIter<'a> = Peekable<Enumerate<Lines<'a>>>;

/// Parsed trace data (internal representation)
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    /// Records in trace order
    pub events: Vec<Event>,

    /// Distinct node ids referenced by `events`
    pub node_count: usize,

    /// True when the node cap stopped reading before end of input
    pub truncated: bool,
}

/// Header fields of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordHeader {
    timestamp_ns: i64,
    current_id: NodeId,
    scheduled_id: NodeId,
    scheduled_timestamp_ns: i64,
}

impl RecordHeader {
    fn into_event(self, stack: Vec<String>) -> Event {
        Event {
            timestamp_ns: self.timestamp_ns,
            current_id: self.current_id,
            scheduled_id: self.scheduled_id,
            scheduled_timestamp_ns: self.scheduled_timestamp_ns,
            stack,
        }
    }

    /// How many ids of this record are not in `seen` yet
    fn unseen_ids(&self, seen: &HashSet<NodeId>) -> usize {
        let current = usize::from(!seen.contains(&self.current_id));
        let scheduled = usize::from(
            self.scheduled_id != self.current_id && !seen.contains(&self.scheduled_id),
        );
        current + scheduled
    }
}

/// Read and parse a trace file
///
/// **Public** - convenience wrapper used by the flowchart command
///
/// # Errors
/// * `ParseError::ReadFailed` - File cannot be read
/// * any error from [`parse_trace`]
pub fn read_trace_file(
    path: impl AsRef<Path>,
    settings: &TraceSettings,
) -> Result<ParsedTrace, ParseError> {
    let path = path.as_ref();
    info!("Reading trace: {}", path.display());

    let raw = std::fs::read_to_string(path)?;
    debug!("Trace is {} bytes", raw.len());

    parse_trace(&raw, settings)
}

/// Parse raw trace text into a sequence of events
///
/// **Public** - main entry point for parsing
///
/// Reading stops once `settings.max_nodes` distinct ids have been seen, or
/// before a record whose new ids would exceed that cap. Lines after that
/// point are ignored.
///
/// # Errors
/// * `ParseError::TraceFormat` - The marker never appears
/// * `ParseError::InvalidRecord` - Short header, non-integer header field,
///   negative node id, or a frame line without `#`
pub fn parse_trace(raw: &str, settings: &TraceSettings) -> Result<ParsedTrace, ParseError> {
    let mut lines: LineIter<'_> = raw.lines().enumerate().peekable();

    let (marker_index, marker_line) = seek_marker(&mut lines, &settings.marker)?;
    debug!("Found marker '{}' on line {}", settings.marker, marker_index + 1);

    // Simulator headers carry the marker themselves; a bare marker line is dropped.
    let mut pending = parse_header(marker_index + 1, marker_line).ok();

    let mut events = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut truncated = false;

    loop {
        if seen.len() >= settings.max_nodes {
            truncated = pending.is_some() || has_more_records(&mut lines);
            break;
        }

        let header = match pending.take() {
            Some(header) => header,
            None => match next_header_line(&mut lines) {
                Some((line_no, line)) => parse_header(line_no, line)?,
                None => break,
            },
        };

        let stack = read_stack(&mut lines)?;

        if seen.len() + header.unseen_ids(&seen) > settings.max_nodes {
            truncated = true;
            break;
        }

        seen.insert(header.current_id);
        seen.insert(header.scheduled_id);
        events.push(header.into_event(stack));
    }

    if truncated {
        warn!(
            "Node cap of {} reached; ignoring the rest of the trace",
            settings.max_nodes
        );
    }

    debug!("Parsed {} events over {} nodes", events.len(), seen.len());

    Ok(ParsedTrace {
        events,
        node_count: seen.len(),
        truncated,
    })
}

/// Skip lines up to and including the first one containing `marker`
///
/// **Private** - internal helper for parse_trace
fn seek_marker<'a>(
    lines: &mut LineIter<'a>,
    marker: &str,
) -> Result<(usize, &'a str), ParseError> {
    lines
        .find(|(_, line)| line.contains(marker))
        .ok_or_else(|| ParseError::TraceFormat {
            marker: marker.to_string(),
        })
}

/// Next non-blank line with its 1-based number
fn next_header_line<'a>(lines: &mut LineIter<'a>) -> Option<(usize, &'a str)> {
    lines
        .find(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line))
}

fn has_more_records(lines: &mut LineIter<'_>) -> bool {
    lines.any(|(_, line)| !line.trim().is_empty())
}

/// Parse one header line
///
/// **Private** - internal parsing logic
fn parse_header(line_no: usize, line: &str) -> Result<RecordHeader, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < MIN_HEADER_TOKENS {
        return Err(ParseError::InvalidRecord {
            line: line_no,
            message: format!(
                "expected at least {} tokens in header, found {}",
                MIN_HEADER_TOKENS,
                tokens.len()
            ),
        });
    }

    let mut fields = [0i64; 4];
    for (slot, &position) in fields.iter_mut().zip(HEADER_FIELD_POSITIONS.iter()) {
        let token = tokens[position];
        *slot = token.parse::<i64>().map_err(|e| ParseError::InvalidRecord {
            line: line_no,
            message: format!("header token {} ('{}') is not an integer: {}", position, token, e),
        })?;
    }

    let [timestamp_ns, current_id, scheduled_id, scheduled_timestamp_ns] = fields;

    Ok(RecordHeader {
        timestamp_ns,
        current_id: node_id(line_no, current_id)?,
        scheduled_id: node_id(line_no, scheduled_id)?,
        scheduled_timestamp_ns,
    })
}

fn node_id(line_no: usize, value: i64) -> Result<NodeId, ParseError> {
    NodeId::try_from(value).map_err(|_| ParseError::InvalidRecord {
        line: line_no,
        message: format!("node id {} is negative", value),
    })
}

/// Collect frame lines up to the separator and return them root first
///
/// **Private** - internal parsing logic
fn read_stack(lines: &mut LineIter<'_>) -> Result<Vec<String>, ParseError> {
    let mut frames = Vec::new();

    for (index, line) in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }

        let (_, frame) = line.split_once('#').ok_or_else(|| ParseError::InvalidRecord {
            line: index + 1,
            message: format!("stack frame line has no '#' delimiter: {:?}", line),
        })?;
        frames.push(frame.to_string());
    }

    // Frames are printed innermost first
    frames.reverse();
    Ok(frames)
}
