//! Line formatting
//!
//! Every sink receives the same line:
//!
//! ```text
//! 2025-01-15 10:30:45.123 [       mekser.driver]    DEBUG: TX (6 bytes): 0250300101
//! 2025-01-15 10:30:45.140 [          PumpMaster]     INFO: >>> PUMP 0x50: CD1-RESET sending command
//! ```
//!
//! The channel column is cosmetic: names longer than the column keep their
//! rightmost characters, which are the most specific part of a dotted name.
//! Routing always uses the full name.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use fuellog_config::LogLevel;

/// Width of the channel column
pub const CHANNEL_WIDTH: usize = 20;

/// Width of the level column (fits `CRITICAL`)
pub const LEVEL_WIDTH: usize = 8;

/// Indentation added to continuation lines of a multi-line message
pub const CONTINUATION_INDENT: &str = "    ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One message on its way to the sinks
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Creation time
    pub timestamp: DateTime<Local>,
    /// Full channel name
    pub channel: &'a str,
    /// Severity
    pub level: LogLevel,
    /// Rendered message text
    pub message: &'a str,
}

impl<'a> Record<'a> {
    /// Record stamped with the current local time
    pub fn now(channel: &'a str, level: LogLevel, message: &'a str) -> Self {
        Self {
            timestamp: Local::now(),
            channel,
            level,
            message,
        }
    }
}

/// Fixed-layout line formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter;

impl Formatter {
    /// Create a formatter
    pub const fn new() -> Self {
        Self
    }

    /// Render a record as one log line (no trailing newline)
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut line = String::with_capacity(
            23 + CHANNEL_WIDTH + LEVEL_WIDTH + 6 + record.message.len(),
        );

        let _ = write!(
            line,
            "{} [{:>cw$}] {:>lw$}: ",
            record.timestamp.format(TIMESTAMP_FORMAT),
            column(record.channel),
            record.level,
            cw = CHANNEL_WIDTH,
            lw = LEVEL_WIDTH,
        );

        // A bare '\r' also starts a continuation line
        let mut parts = record.message.lines().flat_map(|line| line.split('\r'));
        if let Some(first) = parts.next() {
            line.push_str(first);
        }
        for part in parts {
            line.push('\n');
            line.push_str(CONTINUATION_INDENT);
            line.push_str(part);
        }

        line
    }
}

/// Fit a channel name into the column, keeping its tail
fn column(channel: &str) -> &str {
    match channel.char_indices().rev().nth(CHANNEL_WIDTH - 1) {
        Some((idx, _)) => &channel[idx..],
        None => channel,
    }
}

/// Indent a nested detail line with plain spaces (two per depth level)
///
/// Use this instead of tree-drawing characters, which constrained consoles
/// cannot render.
///
/// ```
/// use fuellog::detail;
///
/// assert_eq!(detail(1, "nozzle=2"), "  nozzle=2");
/// assert_eq!(detail(2, "price=45.00"), "    price=45.00");
/// ```
pub fn detail(depth: usize, text: &str) -> String {
    let mut out = String::with_capacity(depth * 2 + text.len());
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out
}
