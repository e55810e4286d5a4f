//! Channel registry
//!
//! Owns the sink set built from a `LogConfig` and hands out channels bound
//! to it. Each name maps to exactly one `Channel`; asking again returns a
//! clone of the same handle, so a channel never ends up with duplicate sinks.
//!
//! # Example
//!
//! ```no_run
//! use fuellog::{LogConfig, LogLevel, Registry};
//!
//! let registry = Registry::new(LogConfig::default().with_level(LogLevel::Info));
//! let driver = registry.channel("mekser.driver");
//! fuellog::info!(driver, "port opened at {} baud", 9600);
//! ```

use std::io::Write;
use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use fuellog_config::{LogConfig, LogLevel};
use fuellog_sinks::{ConsoleSink, MetricsSnapshot, Sink};
use parking_lot::Mutex;

use crate::channel::{Channel, Route};
use crate::outputs::Outputs;

/// Channel that receives the initialization banner
pub const SETUP_CHANNEL: &str = "LoggingSetup";

/// Configuration and the sinks built from it, swapped as one unit
struct State {
    config: LogConfig,
    outputs: Arc<Outputs>,
}

/// Registry of named channels
pub struct Registry {
    state: ArcSwap<State>,
    channels: DashMap<Arc<str>, Channel>,
    reconfigure_lock: Mutex<()>,
}

impl Registry {
    /// Build a registry writing its console output to stderr
    pub fn new(config: LogConfig) -> Self {
        let console =
            ConsoleSink::stderr(config.effective_console_level(), config.console_ascii_only);
        Self::build(config, console)
    }

    /// Build a registry writing its console output to `console`
    pub fn with_console(config: LogConfig, console: Box<dyn Write + Send>) -> Self {
        let console = ConsoleSink::with_writer(
            config.effective_console_level(),
            config.console_ascii_only,
            console,
        );
        Self::build(config, console)
    }

    fn build(config: LogConfig, console: ConsoleSink) -> Self {
        let (outputs, notices) = Outputs::build(&config, Arc::new(console), None);

        tracing::debug!(
            level = %config.level,
            log_to_file = config.log_to_file,
            directory = %config.directory.display(),
            file_sinks = outputs.file_sinks().count(),
            "log registry built"
        );

        let registry = Self {
            state: ArcSwap::from_pointee(State {
                config,
                outputs: Arc::new(outputs),
            }),
            channels: DashMap::new(),
            reconfigure_lock: Mutex::new(()),
        };
        registry.announce(&notices);
        registry
    }

    /// Get or create the channel named `name`
    pub fn channel(&self, name: &str) -> Channel {
        if let Some(existing) = self.channels.get(name) {
            return existing.value().clone();
        }

        let key: Arc<str> = Arc::from(name);
        self.channels
            .entry(Arc::clone(&key))
            .or_insert_with(|| {
                let state = self.state.load();
                let level = state.config.channel_level(name);
                tracing::debug!(channel = name, level = %level, "log channel created");
                Channel::new(key, Route::resolve(name, level, Arc::clone(&state.outputs)))
            })
            .value()
            .clone()
    }

    /// Apply a new configuration
    ///
    /// Returns `false` and changes nothing when `config` equals the current
    /// one. Otherwise the sink set is rebuilt (unchanged file sinks are kept
    /// open) and every existing channel is re-resolved against it.
    pub fn reconfigure(&self, config: LogConfig) -> bool {
        let _guard = self.reconfigure_lock.lock();

        let current = self.state.load_full();
        if current.config == config {
            tracing::debug!("log configuration unchanged");
            return false;
        }

        let console = Arc::new(current.outputs.console().reconfigured(
            config.effective_console_level(),
            config.console_ascii_only,
        ));
        let (outputs, notices) = Outputs::build(&config, console, Some(&current.outputs));
        let outputs = Arc::new(outputs);

        let state = Arc::new(State {
            config,
            outputs: Arc::clone(&outputs),
        });
        self.state.store(Arc::clone(&state));

        for entry in self.channels.iter() {
            let name = entry.key();
            let level = state.config.channel_level(name);
            entry
                .value()
                .rebind(Route::resolve(name, level, Arc::clone(&outputs)));
        }

        current.outputs.flush();

        tracing::info!(
            level = %state.config.level,
            log_to_file = state.config.log_to_file,
            channels = self.channels.len(),
            "log registry reconfigured"
        );

        self.announce(&notices);
        true
    }

    /// Current configuration
    pub fn config(&self) -> LogConfig {
        self.state.load().config.clone()
    }

    /// Names of the channels created so far
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.iter().map(|e| e.key().to_string()).collect();
        names.sort();
        names
    }

    /// Metrics of every live sink, console first
    pub fn sink_metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        let state = self.state.load();
        let outputs = &state.outputs;
        let console = outputs.console();

        let mut metrics = vec![(console.name().to_string(), console.metrics())];
        metrics.extend(
            outputs
                .file_sinks()
                .map(|sink| (sink.name().to_string(), sink.metrics())),
        );
        metrics
    }

    /// Flush every sink
    pub fn flush(&self) {
        self.state.load().outputs.flush();
    }

    /// Report setup failures on the console and write the banner
    pub(crate) fn announce(&self, notices: &[String]) {
        let state = self.state.load();
        for notice in notices {
            state.outputs.notice(LogLevel::Error, notice);
        }

        let setup = self.channel(SETUP_CHANNEL);
        if !setup.enabled(LogLevel::Info) {
            return;
        }

        let config = &state.config;
        setup.info(format_args!("=== LOGGING SYSTEM INITIALIZED ==="));
        setup.info(format_args!("Log level: {}", config.level));
        setup.info(format_args!("Log to file: {}", config.log_to_file));
        if config.log_to_file {
            let directory = std::path::absolute(&config.directory)
                .unwrap_or_else(|_| config.directory.clone());
            setup.info(format_args!("Log directory: {}", directory.display()));
        }
        if !config.channels.is_empty() {
            let overrides: Vec<String> = config
                .channels
                .iter()
                .map(|(name, level)| format!("{name}={level}"))
                .collect();
            setup.info(format_args!("Channel levels: {}", overrides.join(", ")));
        }
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
