//! Sink set built from one configuration

use std::fmt::Display;
use std::sync::Arc;

use dashmap::DashMap;
use fuellog_config::{LogConfig, LogLevel};
use fuellog_routing::RoutingTable;
use fuellog_sinks::util::RateLimitedReporter;
use fuellog_sinks::{ConsoleSink, RotatingFileConfig, RotatingFileSink, Sink};

use crate::format::{Formatter, Record};

/// Channel used for notices about the logging system itself
pub const INTERNAL_CHANNEL: &str = "fuellog";

/// Every sink of one configuration plus the routing table over the files
pub(crate) struct Outputs {
    pub(crate) formatter: Formatter,
    console: Arc<ConsoleSink>,
    table: RoutingTable,
    /// Indexed by `SinkId`; `None` for groups that failed to open
    files: Vec<Option<Arc<RotatingFileSink>>>,
    /// One reporter per sink name, so one failing group cannot mute another
    reporters: DashMap<String, RateLimitedReporter>,
}

impl Outputs {
    /// Build sinks for `config`
    ///
    /// File sinks whose settings did not change are taken over from
    /// `previous` instead of reopening the file. An invalid file setup
    /// disables every group; a group that cannot be opened is left out. The
    /// returned notices describe both.
    pub(crate) fn build(
        config: &LogConfig,
        console: Arc<ConsoleSink>,
        previous: Option<&Outputs>,
    ) -> (Self, Vec<String>) {
        let mut notices = Vec::new();
        let mut table = RoutingTable::new();
        let mut files = Vec::new();

        if config.log_to_file {
            let compiled = config
                .validate()
                .map_err(|e| e.to_string())
                .and_then(|()| RoutingTable::compile(&config.files).map_err(|e| e.to_string()));
            match compiled {
                Ok(compiled) => table = compiled,
                Err(e) => {
                    tracing::warn!(error = %e, "file logging disabled");
                    notices.push(format!("file logging disabled, console only: {e}"));
                }
            }

            for group in config.files.iter().take(table.group_count()) {
                let wanted = RotatingFileConfig::new(config.directory.join(&group.file))
                    .with_level(group.level.unwrap_or(config.level))
                    .with_rotation(group.max_bytes, group.backup_count);

                if let Some(existing) = previous.and_then(|p| p.file_with(&group.name, &wanted)) {
                    files.push(Some(existing));
                    continue;
                }

                match RotatingFileSink::open(group.name.as_str(), wanted) {
                    Ok(sink) => files.push(Some(Arc::new(sink))),
                    Err(e) => {
                        tracing::warn!(group = %group.name, error = %e, "file group disabled");
                        notices.push(format!("file group '{}' disabled, console only: {e}", group.name));
                        files.push(None);
                    }
                }
            }
        }

        let outputs = Self {
            formatter: Formatter::new(),
            console,
            table,
            files,
            reporters: DashMap::new(),
        };
        (outputs, notices)
    }

    fn file_with(&self, name: &str, config: &RotatingFileConfig) -> Option<Arc<RotatingFileSink>> {
        self.files
            .iter()
            .flatten()
            .find(|sink| sink.name() == name && sink.config() == config)
            .cloned()
    }

    /// Sinks a channel writes to: the console, then its file groups in
    /// configuration order
    pub(crate) fn sinks_for(&self, channel: &str) -> Vec<Arc<dyn Sink>> {
        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(1 + self.files.len());
        sinks.push(self.console.clone());
        for id in self.table.route(channel) {
            if let Some(Some(file)) = self.files.get(id.as_usize()) {
                sinks.push(file.clone());
            }
        }
        sinks
    }

    /// Record a sink failure and surface a rate-limited notice on the console
    pub(crate) fn sink_failed(&self, sink: &str, error: &dyn Display) {
        let notice = self
            .reporters
            .entry(sink.to_string())
            .or_default()
            .report(sink, error);
        if let Some(notice) = notice
            && sink != self.console.name()
        {
            self.notice(LogLevel::Error, &notice);
        }
    }

    /// Write a line from the logging system itself straight to the console
    pub(crate) fn notice(&self, level: LogLevel, message: &str) {
        let line = self
            .formatter
            .format(&Record::now(INTERNAL_CHANNEL, level, message));
        if let Err(e) = self.console.write_line(&line) {
            tracing::warn!(error = %e, "console unavailable for notice");
        }
    }

    pub(crate) fn console(&self) -> &Arc<ConsoleSink> {
        &self.console
    }

    pub(crate) fn file_sinks(&self) -> impl Iterator<Item = &Arc<RotatingFileSink>> {
        self.files.iter().flatten()
    }

    pub(crate) fn flush(&self) {
        if let Err(e) = self.console.flush() {
            self.sink_failed(self.console.name(), &e);
        }
        for file in self.file_sinks() {
            if let Err(e) = file.flush() {
                self.sink_failed(file.name(), &e);
            }
        }
    }
}
