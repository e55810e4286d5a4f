//! Rotating File Sink - size-bounded UTF-8 log files
//!
//! Appends formatted lines to a primary file and rolls it over to numbered
//! backups when the next line would take it past `max_bytes`.
//!
//! # Guarantees
//!
//! - **Fixed encoding**: lines are Rust strings, written as UTF-8 bytes on every host
//! - **Whole lines**: each line (newline included) is one `write_all` under the file lock
//! - **Atomic rotation**: rename + reopen happen under the same lock as writes,
//!   so no line is split between generations
//! - **Degrade, don't drop**: a failed rename keeps appending to the current file
//!
//! # Example
//!
//! ```no_run
//! use fuellog_config::LogLevel;
//! use fuellog_sinks::{RotatingFileConfig, RotatingFileSink, Sink};
//!
//! let config = RotatingFileConfig::new("logs/fuel_master.log").with_level(LogLevel::Info);
//! let sink = RotatingFileSink::open("system", config).unwrap();
//! sink.write_line("2025-01-15 10:30:45.123 [          PumpMaster]     INFO: ready").unwrap();
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fuellog_config::{DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES, LogLevel};
use parking_lot::Mutex;

use crate::common::{MetricsSnapshot, Result, Sink, SinkError, SinkMetrics};
use crate::util::{SizePolicy, shift_backups};

/// Configuration for a rotating file sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingFileConfig {
    /// Primary file path
    pub path: PathBuf,

    /// Minimum level written
    pub level: LogLevel,

    /// Rotate before the primary would exceed this size (default: 10 MiB)
    pub max_bytes: u64,

    /// Backups kept (default: 5)
    pub backup_count: usize,
}

impl RotatingFileConfig {
    /// Create config with default limits
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: LogLevel::Debug,
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
        }
    }

    /// Set the minimum level
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set rotation limits
    #[must_use]
    pub fn with_rotation(mut self, max_bytes: u64, backup_count: usize) -> Self {
        self.max_bytes = max_bytes;
        self.backup_count = backup_count;
        self
    }

    fn policy(&self) -> SizePolicy {
        SizePolicy {
            max_bytes: self.max_bytes,
            backup_count: self.backup_count,
        }
    }
}

/// Open handle and its current size
struct FileState {
    /// `None` only after a failed reopen; the next write retries
    file: Option<File>,
    size: u64,
    /// After a failed rotation, no retry until the file reaches this size
    retry_at: u64,
}

/// Size-rotated file sink
pub struct RotatingFileSink {
    name: String,
    config: RotatingFileConfig,
    state: Mutex<FileState>,
    metrics: SinkMetrics,
}

impl RotatingFileSink {
    /// Open (or create) the primary file, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Open` if the directory or file cannot be created.
    pub fn open(name: impl Into<String>, config: RotatingFileConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| SinkError::open(parent.display().to_string(), e))?;
        }

        let (file, size) = reopen(&config.path)?;

        let name = name.into();
        tracing::debug!(
            sink = %name,
            path = %config.path.display(),
            size,
            "opened rotating log file"
        );

        Ok(Self {
            name,
            config,
            state: Mutex::new(FileState {
                file: Some(file),
                size,
                retry_at: 0,
            }),
            metrics: SinkMetrics::new(),
        })
    }

    /// Primary file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Sink configuration
    pub fn config(&self) -> &RotatingFileConfig {
        &self.config
    }

    /// Roll the primary over to `.1` and open a fresh one
    ///
    /// Called with the state lock held. On rename failure the current handle
    /// (or a reopened one) keeps receiving writes.
    fn rollover(&self, state: &mut FileState) -> Result<()> {
        // Close before renaming; Windows refuses to rename open files
        if let Some(mut file) = state.file.take() {
            let _ = file.flush();
        }

        let shifted = shift_backups(&self.config.path, self.config.backup_count);

        // After a failed shift this reopens the old primary, still full
        match reopen(&self.config.path) {
            Ok((file, size)) => {
                state.file = Some(file);
                state.size = size;
            }
            Err(e) => {
                self.metrics.rotation_failure();
                return Err(e);
            }
        }

        match shifted {
            Ok(()) => {
                state.retry_at = 0;
                self.metrics.rotation();
                tracing::info!(
                    sink = %self.name,
                    path = %self.config.path.display(),
                    backups = self.config.backup_count,
                    "log file rotated"
                );
                Ok(())
            }
            Err(e) => {
                state.retry_at = state.size.saturating_add(self.config.max_bytes);
                self.metrics.rotation_failure();
                tracing::warn!(
                    sink = %self.name,
                    path = %self.config.path.display(),
                    error = %e,
                    "log rotation failed, appending to current file"
                );
                Err(SinkError::rotate(self.config.path.display().to_string(), e))
            }
        }
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        self.config.level
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        let incoming = buf.len() as u64;

        let mut state = self.state.lock();

        let mut rotation_error = None;
        if state.file.is_none() {
            match reopen(&self.config.path) {
                Ok((file, size)) => {
                    state.file = Some(file);
                    state.size = size;
                }
                Err(e) => rotation_error = Some(e),
            }
        } else if state.size >= state.retry_at
            && self.config.policy().needs_rollover(state.size, incoming)
            && let Err(e) = self.rollover(&mut state)
        {
            rotation_error = Some(e);
        }

        let Some(file) = state.file.as_mut() else {
            self.metrics.write_error();
            return Err(rotation_error.unwrap_or_else(|| {
                SinkError::open(
                    self.config.path.display().to_string(),
                    io::Error::from(io::ErrorKind::NotFound),
                )
            }));
        };

        match file.write_all(&buf) {
            Ok(()) => {
                state.size += incoming;
                self.metrics.line_written(incoming);
            }
            Err(e) => {
                self.metrics.write_error();
                return Err(SinkError::write(&self.name, e));
            }
        }

        match rotation_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        match state.file.as_mut() {
            Some(file) => file.flush().map_err(|e| SinkError::write(&self.name, e)),
            None => Ok(()),
        }
    }

    fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

fn open_append(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SinkError::open(path.display().to_string(), e))
}

fn reopen(path: &Path) -> Result<(File, u64)> {
    let file = open_append(path)?;
    let size = file
        .metadata()
        .map_err(|e| SinkError::open(path.display().to_string(), e))?
        .len();
    Ok((file, size))
}

#[cfg(test)]
#[path = "rotating_file_test.rs"]
mod rotating_file_test;
