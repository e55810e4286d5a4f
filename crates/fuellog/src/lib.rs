//! fuellog - channeled diagnostic logging for DART pump control
//!
//! Named channels (`mekser.driver`, `PumpMaster`, `API`, ...) write one
//! fixed-layout line per message to the console and to size-rotated files.
//! Each channel has its own threshold; each sink has another, and a message
//! reaches a sink only when it passes both.
//!
//! # Example
//!
//! ```no_run
//! use fuellog::{Direction, LogConfig, LogLevel, Registry};
//!
//! let registry = Registry::new(LogConfig::default());
//! let driver = registry.channel("mekser.driver");
//! let pumps = registry.channel("PumpMaster");
//!
//! fuellog::log_hex(&driver, LogLevel::Debug, "TX", &[0x50, 0x30, 0x01], fuellog::DEFAULT_HEX_LIMIT);
//! fuellog::summarize_directional(&pumps, Direction::Tx, 0x50, "CD1-RESET", "sending command");
//! fuellog::warn!(pumps, "pump {} did not answer, retry {}", fuellog::Addr(0x50), 2);
//! ```
//!
//! A process-wide registry is available through [`init`], [`global`] and
//! [`channel`] for code that cannot thread a registry through.

mod channel;
mod format;
mod global;
mod hexdump;
mod level;
mod outputs;
mod registry;
mod summary;

pub use channel::Channel;
pub use format::{CHANNEL_WIDTH, Formatter, LEVEL_WIDTH, Record, detail};
pub use global::{channel, global, init};
pub use hexdump::{DEFAULT_HEX_LIMIT, log_hex, render_hex};
pub use level::{should_emit, sink_emits};
pub use outputs::INTERNAL_CHANNEL;
pub use registry::{Registry, SETUP_CHANNEL};
pub use summary::{Addr, Direction, summarize, summarize_directional, summary_line};

pub use fuellog_config::{ChannelMatch, ConfigError, FileGroupConfig, LogConfig, LogLevel};
pub use fuellog_sinks::{MetricsSnapshot, SinkError};

/// Emit at an explicit level
///
/// Arguments are only evaluated when the channel would emit the level.
#[macro_export]
macro_rules! log {
    ($channel:expr, $level:expr, $($arg:tt)+) => {{
        let channel: &$crate::Channel = &$channel;
        let level: $crate::LogLevel = $level;
        if channel.enabled(level) {
            channel.log(level, format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($channel:expr, $($arg:tt)+) => {
        $crate::log!($channel, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($channel:expr, $($arg:tt)+) => {
        $crate::log!($channel, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($channel:expr, $($arg:tt)+) => {
        $crate::log!($channel, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($channel:expr, $($arg:tt)+) => {
        $crate::log!($channel, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($channel:expr, $($arg:tt)+) => {
        $crate::log!($channel, $crate::LogLevel::Critical, $($arg)+)
    };
}
