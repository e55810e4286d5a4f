//! Rotating file group configuration
//!
//! A file group is one primary log file plus its rotated backups, fed by
//! every channel whose name passes the group's match condition.
//!
//! # Example
//!
//! ```toml
//! [[files]]
//! name = "driver"
//! file = "driver_communication.log"
//! level = "debug"
//! max_bytes = 5242880
//! backup_count = 10
//! match = { prefix = "mekser.driver" }
//! ```

use serde::Deserialize;

use crate::logging::{DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES, LogLevel};

/// Which channels feed a file group
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMatch {
    /// Every channel
    #[default]
    All,
    /// Exactly one channel name
    Exact(String),
    /// Any channel whose name starts with this string
    Prefix(String),
}

impl ChannelMatch {
    /// Check whether a channel name passes this condition
    pub fn matches(&self, channel: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(name) => channel == name,
            Self::Prefix(prefix) => channel.starts_with(prefix.as_str()),
        }
    }
}

/// One rotating log file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FileGroupConfig {
    /// Group name (unique)
    pub name: String,

    /// File name inside the log directory
    pub file: String,

    /// Sink threshold; `None` uses the global level
    #[serde(default)]
    pub level: Option<LogLevel>,

    /// Rotate when the file would grow past this many bytes
    /// Default: 10 MiB
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Number of rotated files kept (`file.1` .. `file.N`)
    /// Default: 5
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,

    /// Channel match condition
    #[serde(default, rename = "match")]
    pub match_condition: ChannelMatch,
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

fn default_backup_count() -> usize {
    DEFAULT_BACKUP_COUNT
}

impl FileGroupConfig {
    /// Create a group matching every channel, with default rotation limits
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            level: None,
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            match_condition: ChannelMatch::All,
        }
    }

    /// Set the sink threshold
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the rotation limits
    #[must_use]
    pub fn with_rotation(mut self, max_bytes: u64, backup_count: usize) -> Self {
        self.max_bytes = max_bytes;
        self.backup_count = backup_count;
        self
    }

    /// Set the channel match condition
    #[must_use]
    pub fn with_match(mut self, condition: ChannelMatch) -> Self {
        self.match_condition = condition;
        self
    }

    /// The three groups of the FuelMaster controller: the whole system,
    /// DART driver traffic, and pump transactions.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("system", "fuel_master.log"),
            Self::new("driver", "driver_communication.log")
                .with_level(LogLevel::Debug)
                .with_rotation(5 * 1024 * 1024, 10)
                .with_match(ChannelMatch::Prefix("mekser.driver".into())),
            Self::new("transactions", "pump_transactions.log")
                .with_level(LogLevel::Info)
                .with_rotation(5 * 1024 * 1024, 5)
                .with_match(ChannelMatch::Exact("PumpMaster".into())),
        ]
    }
}
