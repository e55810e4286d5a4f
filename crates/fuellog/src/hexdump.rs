//! Hex dumps of wire frames

use fuellog_config::LogLevel;

use crate::Channel;

/// Bytes shown before a dump is truncated
pub const DEFAULT_HEX_LIMIT: usize = 64;

/// Render bytes as contiguous uppercase hex
///
/// At most `max_len` bytes are shown; the rest are counted in a suffix.
///
/// ```
/// use fuellog::render_hex;
///
/// assert_eq!(render_hex(&[0x02, 0x50, 0x30], 64), "025030");
/// assert_eq!(render_hex(&[0xAA; 5], 2), "AAAA... (+3 more bytes)");
/// assert_eq!(render_hex(&[], 64), "");
/// ```
pub fn render_hex(bytes: &[u8], max_len: usize) -> String {
    let shown = bytes.len().min(max_len);
    let mut out = hex::encode_upper(&bytes[..shown]);
    let hidden = bytes.len() - shown;
    if hidden > 0 {
        out.push_str(&format!("... (+{hidden} more bytes)"));
    }
    out
}

/// Emit `"<label> (<N> bytes): <HEX>"` on a channel
///
/// Nothing is rendered when the channel would discard the level.
pub fn log_hex(channel: &Channel, level: LogLevel, label: &str, data: &[u8], max_len: usize) {
    if !channel.enabled(level) {
        return;
    }
    channel.log(
        level,
        format_args!("{label} ({} bytes): {}", data.len(), render_hex(data, max_len)),
    );
}
