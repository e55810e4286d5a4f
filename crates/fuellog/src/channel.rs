//! Named logging channels
//!
//! A `Channel` is a cheap handle. Clones share one resolved route (channel
//! level plus attached sinks), which the registry swaps atomically when the
//! configuration changes. Emitting never fails: sink errors are reported
//! through the console and otherwise swallowed.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use fuellog_config::LogLevel;
use fuellog_sinks::Sink;

use crate::format::Record;
use crate::level::{should_emit, sink_emits};
use crate::outputs::Outputs;

/// Resolved destination set of a channel
pub(crate) struct Route {
    pub(crate) level: LogLevel,
    pub(crate) sinks: Vec<Arc<dyn Sink>>,
    pub(crate) outputs: Arc<Outputs>,
}

impl Route {
    pub(crate) fn resolve(name: &str, level: LogLevel, outputs: Arc<Outputs>) -> Self {
        Self {
            level,
            sinks: outputs.sinks_for(name),
            outputs,
        }
    }
}

struct ChannelInner {
    name: Arc<str>,
    route: ArcSwap<Route>,
}

/// Handle to a named channel
#[derive(Clone)]
pub struct Channel {
    inner: Arc<ChannelInner>,
}

impl Channel {
    pub(crate) fn new(name: Arc<str>, route: Route) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                name,
                route: ArcSwap::from_pointee(route),
            }),
        }
    }

    pub(crate) fn rebind(&self, route: Route) {
        self.inner.route.store(Arc::new(route));
    }

    /// Channel name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Effective channel threshold
    pub fn level(&self) -> LogLevel {
        self.inner.route.load().level
    }

    /// Names of the attached sinks, console first
    pub fn sink_names(&self) -> Vec<String> {
        self.inner
            .route
            .load()
            .sinks
            .iter()
            .map(|sink| sink.name().to_string())
            .collect()
    }

    /// Whether both handles refer to the same channel
    pub fn ptr_eq(a: &Channel, b: &Channel) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Whether a message at `level` would reach at least one sink
    ///
    /// Check this before building expensive arguments.
    pub fn enabled(&self, level: LogLevel) -> bool {
        let route = self.inner.route.load();
        should_emit(route.level, level)
            && route
                .sinks
                .iter()
                .any(|sink| sink_emits(route.level, sink.level(), level))
    }

    /// Emit a message
    ///
    /// Arguments are formatted at most once, and only when some sink accepts
    /// the level.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let route = self.inner.route.load();
        if !should_emit(route.level, level) {
            return;
        }

        let mut line = None;
        for sink in &route.sinks {
            if !sink_emits(route.level, sink.level(), level) {
                continue;
            }
            let line = line.get_or_insert_with(|| {
                let message = match args.as_str() {
                    Some(text) => text.to_string(),
                    None => fmt::format(args),
                };
                route
                    .outputs
                    .formatter
                    .format(&Record::now(&self.inner.name, level, &message))
            });
            if let Err(e) = sink.write_line(line) {
                route.outputs.sink_failed(sink.name(), &e);
            }
        }
    }

    /// Emit at DEBUG
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Emit at INFO
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Emit at WARNING
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, args);
    }

    /// Emit at ERROR
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    /// Emit at CRITICAL
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Critical, args);
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("sinks", &self.sink_names())
            .finish()
    }
}
