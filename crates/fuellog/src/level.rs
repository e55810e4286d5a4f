//! Two-layer level filtering
//!
//! A message passes its channel's threshold first, then each sink's own.
//! Both are inclusive, so a sink emits iff
//! `message >= max(channel_level, sink_level)`.

use fuellog_config::LogLevel;

/// Channel-layer check
#[inline]
pub fn should_emit(channel_level: LogLevel, message: LogLevel) -> bool {
    message >= channel_level
}

/// Combined check for one sink
#[inline]
pub fn sink_emits(channel_level: LogLevel, sink_level: LogLevel, message: LogLevel) -> bool {
    message >= channel_level.max(sink_level)
}
