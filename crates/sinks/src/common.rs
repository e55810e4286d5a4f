//! Common types shared by all sinks
//!
//! The `Sink` trait, sink errors, and per-sink counters.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use fuellog_config::LogLevel;
use thiserror::Error;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

/// An output destination for formatted log lines
///
/// Implementations synchronize internally: `write_line` may be called from
/// any number of threads and each line lands whole.
pub trait Sink: Send + Sync {
    /// Sink name (for failure reports)
    fn name(&self) -> &str;

    /// Minimum level this sink writes
    fn level(&self) -> LogLevel;

    /// Write one formatted line (without trailing newline)
    fn write_line(&self, line: &str) -> Result<()>;

    /// Flush buffered output
    fn flush(&self) -> Result<()>;

    /// Counters for this sink
    fn metrics(&self) -> MetricsSnapshot;
}

/// Counters shared by all sink types
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Lines successfully written
    pub lines_written: AtomicU64,

    /// Bytes successfully written (newline included)
    pub bytes_written: AtomicU64,

    /// Failed writes
    pub write_errors: AtomicU64,

    /// Lines written through the ASCII fallback
    pub fallbacks: AtomicU64,

    /// Completed rotations
    pub rotations: AtomicU64,

    /// Rotations that failed and kept the old file
    pub rotation_failures: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
            rotation_failures: AtomicU64::new(0),
        }
    }

    /// Record a written line
    #[inline]
    pub fn line_written(&self, bytes: u64) {
        self.lines_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a write error
    #[inline]
    pub fn write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a line written via fallback rendering
    #[inline]
    pub fn fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed rotation
    #[inline]
    pub fn rotation(&self) {
        self.rotations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed rotation
    #[inline]
    pub fn rotation_failure(&self) {
        self.rotation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_written: self.lines_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
            rotation_failures: self.rotation_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of sink metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lines_written: u64,
    pub bytes_written: u64,
    pub write_errors: u64,
    pub fallbacks: u64,
    pub rotations: u64,
    pub rotation_failures: u64,
}

/// Sink errors
///
/// None of these ever reach application code; the channel hands them to the
/// failure reporter.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Log directory or file could not be opened
    #[error("failed to open '{path}': {source}")]
    Open {
        /// Path that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Write or flush failed
    #[error("write to sink '{sink}' failed: {source}")]
    Write {
        /// Sink name
        sink: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Rename or reopen during rotation failed; the old file is still in use
    #[error("rotation of '{path}' failed, appending to current file: {source}")]
    Rotate {
        /// Primary file path
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Console could not take the line even after ASCII fallback
    #[error("console sink '{sink}' dropped a line: {message}")]
    Encoding {
        /// Sink name
        sink: String,
        /// Failure description
        message: String,
    },
}

impl SinkError {
    /// Create an Open error
    pub fn open(path: impl Into<String>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a Write error
    pub fn write(sink: impl Into<String>, source: io::Error) -> Self {
        Self::Write {
            sink: sink.into(),
            source,
        }
    }

    /// Create a Rotate error
    pub fn rotate(path: impl Into<String>, source: io::Error) -> Self {
        Self::Rotate {
            path: path.into(),
            source,
        }
    }

    /// Create an Encoding error
    pub fn encoding(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoding {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;
