//! One-line summaries of pump operations
//!
//! `PUMP 0x50: CD1-RESET pump reset`, optionally prefixed with `>>>` for
//! commands sent and `<<<` for replies and events received.

use std::fmt;

use fuellog_config::LogLevel;

use crate::Channel;

/// Direction of a summarized operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Command sent to the pump
    Tx,
    /// Reply received from the pump
    Rx,
    /// Unsolicited event from the pump
    Event,
}

impl Direction {
    /// Line prefix
    pub fn marker(self) -> &'static str {
        match self {
            Self::Tx => ">>>",
            Self::Rx | Self::Event => "<<<",
        }
    }
}

/// Pump address rendered as `0xHH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Addr(pub u8);

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Build a summary line
pub fn summary_line(direction: Option<Direction>, actor: u8, operation: &str, outcome: &str) -> String {
    let mut line = String::with_capacity(24 + operation.len() + outcome.len());
    if let Some(direction) = direction {
        line.push_str(direction.marker());
        line.push(' ');
    }
    line.push_str(&format!("PUMP {}: {}", Addr(actor), operation));
    let outcome = outcome.trim();
    if !outcome.is_empty() {
        line.push(' ');
        line.push_str(outcome);
    }
    line
}

/// Emit a summary line at INFO
pub fn summarize(channel: &Channel, actor: u8, operation: &str, outcome: &str) {
    if channel.enabled(LogLevel::Info) {
        channel.info(format_args!("{}", summary_line(None, actor, operation, outcome)));
    }
}

/// Emit a summary line at INFO with a direction marker
pub fn summarize_directional(
    channel: &Channel,
    direction: Direction,
    actor: u8,
    operation: &str,
    outcome: &str,
) {
    if channel.enabled(LogLevel::Info) {
        channel.info(format_args!(
            "{}",
            summary_line(Some(direction), actor, operation, outcome)
        ));
    }
}
