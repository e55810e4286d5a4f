//! Console Sink - operator-facing output on stderr
//!
//! Writes the same formatted lines as the file sinks. The console is the one
//! destination whose encoding we do not control (serial terminals, legacy
//! Windows code pages), so it is also the only one with a fallback:
//!
//! 1. write the line as UTF-8
//! 2. on failure, write it again with every non-ASCII character replaced by `?`
//! 3. if that fails too, drop the line for this sink and report an error
//!
//! With `ascii_only` set, step 1 already uses the replaced form.

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Arc;

use fuellog_config::LogLevel;
use parking_lot::Mutex;

use crate::common::{MetricsSnapshot, Result, Sink, SinkError, SinkMetrics};

/// Console sink
pub struct ConsoleSink {
    name: String,
    level: LogLevel,
    ascii_only: bool,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    metrics: SinkMetrics,
}

impl ConsoleSink {
    /// Console sink on the process's standard error stream
    pub fn stderr(level: LogLevel, ascii_only: bool) -> Self {
        Self::with_writer(level, ascii_only, Box::new(io::stderr()))
    }

    /// Console sink on an arbitrary writer
    pub fn with_writer(level: LogLevel, ascii_only: bool, writer: Box<dyn Write + Send>) -> Self {
        Self {
            name: "console".into(),
            level,
            ascii_only,
            writer: Arc::new(Mutex::new(writer)),
            metrics: SinkMetrics::new(),
        }
    }

    /// New sink on the same writer with different settings
    ///
    /// Metrics start from zero; writes from both sinks are serialized on the
    /// shared writer.
    pub fn reconfigured(&self, level: LogLevel, ascii_only: bool) -> Self {
        Self {
            name: self.name.clone(),
            level,
            ascii_only,
            writer: Arc::clone(&self.writer),
            metrics: SinkMetrics::new(),
        }
    }

    fn write_raw(writer: &mut dyn Write, text: &str) -> io::Result<u64> {
        let mut buf = Vec::with_capacity(text.len() + 1);
        buf.extend_from_slice(text.as_bytes());
        buf.push(b'\n');
        writer.write_all(&buf)?;
        writer.flush()?;
        Ok(buf.len() as u64)
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        self.level
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let first = if self.ascii_only {
            ascii_lossy(line)
        } else {
            Cow::Borrowed(line)
        };

        let mut writer = self.writer.lock();
        let err = match Self::write_raw(&mut **writer, &first) {
            Ok(bytes) => {
                self.metrics.line_written(bytes);
                return Ok(());
            }
            Err(e) => e,
        };

        if first.is_ascii() {
            self.metrics.write_error();
            return Err(SinkError::write(&self.name, err));
        }

        match Self::write_raw(&mut **writer, &ascii_lossy(line)) {
            Ok(bytes) => {
                self.metrics.line_written(bytes);
                self.metrics.fallback();
                Ok(())
            }
            Err(fallback_err) => {
                self.metrics.write_error();
                Err(SinkError::encoding(
                    &self.name,
                    format!("{err}; ASCII fallback: {fallback_err}"),
                ))
            }
        }
    }

    fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| SinkError::write(&self.name, e))
    }

    fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Replace every non-ASCII character with `?`
///
/// Borrows when the text is already ASCII.
pub fn ascii_lossy(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_ascii() { c } else { '?' })
                .collect(),
        )
    }
}
