//! Process-wide registry
//!
//! Optional convenience over [`Registry`]. Code that can pass a registry
//! around (and every test) should build its own instead.

use std::sync::OnceLock;

use fuellog_config::{ConfigError, LogConfig, LogLevel};

use crate::{Channel, Registry};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry, or reconfigure it if already installed
///
/// Calling again with the same configuration changes nothing.
pub fn init(config: LogConfig) -> &'static Registry {
    let mut pending = Some(config);
    let registry = GLOBAL.get_or_init(|| Registry::new(pending.take().unwrap_or_default()));
    if let Some(config) = pending {
        registry.reconfigure(config);
    }
    registry
}

/// The process-wide registry
///
/// Without a prior [`init`], the first call builds one from the
/// `FUEL_MASTER_*` environment when auto-initialization is on. With
/// auto-initialization off it falls back to console-only WARNING output.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(|| {
        let (config, error) = auto_config(LogConfig::from_env());
        let registry = Registry::new(config);
        if let Some(e) = error {
            registry.channel(crate::outputs::INTERNAL_CHANNEL).log(
                LogLevel::Error,
                format_args!("invalid logging environment, using fallback: {e}"),
            );
        }
        registry
    })
}

/// Channel from the process-wide registry
pub fn channel(name: &str) -> Channel {
    global().channel(name)
}

/// Pick the configuration for an implicit registry
fn auto_config(from_env: Result<LogConfig, ConfigError>) -> (LogConfig, Option<ConfigError>) {
    match from_env {
        Ok(config) if config.auto_init => (config, None),
        Ok(_) => (LogConfig::fallback(), None),
        Err(e) => (LogConfig::fallback(), Some(e)),
    }
}
