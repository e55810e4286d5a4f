//! FuelMaster logging configuration
//!
//! One explicit value, built once at startup and handed to the registry.
//! Defaults reproduce the controller's stock layout: a whole-system file,
//! a DART driver file and a pump transaction file under `logs/`.
//!
//! # Sources
//!
//! ```
//! use fuellog_config::{LogConfig, LogLevel};
//! use std::str::FromStr;
//!
//! // From TOML
//! let config = LogConfig::from_str("level = \"info\"\nlog_to_file = false").unwrap();
//! assert_eq!(config.level, LogLevel::Info);
//!
//! // From code, overriding whatever the environment said
//! let config = LogConfig::default().with_level(LogLevel::Warning).with_log_to_file(false);
//! assert!(!config.log_to_file);
//! ```
//!
//! `LogConfig::from_env()` reads the `FUEL_MASTER_*` variables (see [`env`]).

pub mod env;
mod error;
mod groups;
mod logging;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use env::{ENV_AUTO_LOGGING, ENV_LOG_LEVEL, ENV_LOG_TO_FILE};
pub use error::{ConfigError, Result};
pub use groups::{ChannelMatch, FileGroupConfig};
pub use logging::{DEFAULT_BACKUP_COUNT, DEFAULT_LOG_DIR, DEFAULT_MAX_BYTES, LogConfig, LogLevel};

impl LogConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: LogConfig = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error on duplicate group names, empty or nested file names, or
    /// a zero rotation threshold.
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for LogConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
