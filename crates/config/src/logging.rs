//! Log levels and the top-level logging configuration
//!
//! Controls the global threshold, file output, console behavior and
//! per-channel overrides.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::groups::FileGroupConfig;

/// Severity level
///
/// Levels form a strict total order: `Debug < Info < Warning < Error < Critical`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Frame-level detail (hex dumps, parser steps)
    #[default]
    Debug,
    /// Normal operation
    Info,
    /// Something unexpected that the caller recovered from
    #[serde(alias = "warn")]
    Warning,
    /// An operation failed
    Error,
    /// The controller can no longer talk to the pumps
    Critical,
}

impl LogLevel {
    /// All levels, lowest first
    pub const ALL: [LogLevel; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Uppercase name as it appears in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width/alignment flags in format strings apply
        f.pad(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(ConfigError::invalid_value(
                "log",
                "level",
                "level",
                format!("unknown level '{other}'"),
            )),
        }
    }
}

/// Default maximum size of a rotating log file (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups kept per file
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Default log directory
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Logging configuration
///
/// Built once at startup (from the environment, a TOML file, or code) and
/// handed to the registry. Nothing downstream reads the environment.
///
/// # Example
///
/// ```toml
/// level = "info"
/// log_to_file = true
/// directory = "/var/log/fuelmaster"
///
/// [channels]
/// "mekser.driver" = "debug"
/// API = "warning"
///
/// [[files]]
/// name = "system"
/// file = "fuel_master.log"
/// match = "all"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Global minimum level
    /// Default: debug
    pub level: LogLevel,

    /// Write to rotating files in addition to the console
    /// Default: true
    pub log_to_file: bool,

    /// Initialize the process-wide registry on first use
    /// Default: true
    pub auto_init: bool,

    /// Directory holding all log files
    /// Default: "logs"
    pub directory: PathBuf,

    /// Console threshold; `None` uses the global level
    pub console_level: Option<LogLevel>,

    /// Replace non-ASCII characters on the console with '?'
    /// Default: false
    pub console_ascii_only: bool,

    /// Per-channel level overrides, matched on dotted prefixes
    pub channels: BTreeMap<String, LogLevel>,

    /// Rotating file groups
    pub files: Vec<FileGroupConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        let channels = [
            ("mekser.driver", LogLevel::Debug),
            ("PumpMaster", LogLevel::Debug),
            ("API", LogLevel::Info),
        ]
        .into_iter()
        .map(|(name, level)| (name.to_string(), level))
        .collect();

        Self {
            level: LogLevel::Debug,
            log_to_file: true,
            auto_init: true,
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            console_level: None,
            console_ascii_only: false,
            channels,
            files: FileGroupConfig::defaults(),
        }
    }
}

impl LogConfig {
    /// Configuration used when nothing was initialized and auto-init is off:
    /// console only, warnings and above.
    pub fn fallback() -> Self {
        Self {
            level: LogLevel::Warning,
            log_to_file: false,
            auto_init: false,
            channels: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Override the global level
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable file output
    #[must_use]
    pub fn with_log_to_file(mut self, enabled: bool) -> Self {
        self.log_to_file = enabled;
        self
    }

    /// Enable or disable auto-initialization
    #[must_use]
    pub fn with_auto_init(mut self, enabled: bool) -> Self {
        self.auto_init = enabled;
        self
    }

    /// Set the log directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the console threshold
    #[must_use]
    pub fn with_console_level(mut self, level: LogLevel) -> Self {
        self.console_level = Some(level);
        self
    }

    /// Add or replace a per-channel override
    #[must_use]
    pub fn with_channel_level(mut self, channel: impl Into<String>, level: LogLevel) -> Self {
        self.channels.insert(channel.into(), level);
        self
    }

    /// Replace the file groups
    #[must_use]
    pub fn with_files(mut self, files: Vec<FileGroupConfig>) -> Self {
        self.files = files;
        self
    }

    /// Effective console threshold
    pub fn effective_console_level(&self) -> LogLevel {
        self.console_level.unwrap_or(self.level)
    }

    /// Effective level for a channel
    ///
    /// The most specific dotted prefix with an override wins: with an override
    /// for `mekser.driver`, the channel `mekser.driver.io` uses it too.
    /// Channels without any override use the global level.
    pub fn channel_level(&self, channel: &str) -> LogLevel {
        let mut candidate = channel;
        loop {
            if let Some(level) = self.channels.get(candidate) {
                return *level;
            }
            match candidate.rfind('.') {
                Some(idx) => candidate = &candidate[..idx],
                None => return self.level,
            }
        }
    }
}
