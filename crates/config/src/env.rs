//! Environment variable loading
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `FUEL_MASTER_LOG_LEVEL` | global level (DEBUG, INFO, WARNING, ERROR) | `DEBUG` |
//! | `FUEL_MASTER_LOG_TO_FILE` | `1` enables file output | `1` |
//! | `FUEL_MASTER_AUTO_LOGGING` | `1` enables auto-initialization | `1` |
//!
//! Boolean variables are on only for the literal value `1`.

use crate::error::{ConfigError, Result};
use crate::logging::{LogConfig, LogLevel};

/// Global level variable
pub const ENV_LOG_LEVEL: &str = "FUEL_MASTER_LOG_LEVEL";

/// File output variable
pub const ENV_LOG_TO_FILE: &str = "FUEL_MASTER_LOG_TO_FILE";

/// Auto-initialization variable
pub const ENV_AUTO_LOGGING: &str = "FUEL_MASTER_AUTO_LOGGING";

impl LogConfig {
    /// Build a configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if `FUEL_MASTER_LOG_LEVEL` is set to an unknown level.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the level variable holds an unknown level.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            config.level = raw.parse::<LogLevel>().map_err(|_| {
                ConfigError::invalid_value("env", ENV_LOG_LEVEL, "level", format!("unknown level '{raw}'"))
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_TO_FILE) {
            config.log_to_file = flag(&raw);
        }
        if let Some(raw) = lookup(ENV_AUTO_LOGGING) {
            config.auto_init = flag(&raw);
        }

        Ok(config)
    }
}

fn flag(raw: &str) -> bool {
    raw.trim() == "1"
}
