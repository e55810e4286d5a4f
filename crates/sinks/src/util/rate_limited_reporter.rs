//! Rate-limited failure reporting
//!
//! Sink failures are never raised to callers, but an operator still needs to
//! hear about them once. The reporter lets the first failure through, then at
//! most one per interval, carrying a count of the failures it swallowed.
//!
//! # Example
//!
//! ```
//! use fuellog_sinks::util::RateLimitedReporter;
//! use std::io;
//! use std::time::Duration;
//!
//! let reporter = RateLimitedReporter::new(Duration::from_secs(10));
//! let err = io::Error::other("disk full");
//!
//! assert!(reporter.report("fuel_master.log", &err).is_some());
//! assert!(reporter.report("fuel_master.log", &err).is_none());
//! ```

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default interval between reports (10 seconds)
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Rate-limited failure reporter
///
/// Thread-safe: atomic counters plus a mutex for the last report time.
pub struct RateLimitedReporter {
    /// Minimum interval between reports
    min_interval: Duration,

    /// Last time a report was let through
    last_report: Mutex<Option<Instant>>,

    /// Failures since the last report
    pending: AtomicU64,

    /// Failures ever recorded
    total: AtomicU64,
}

impl RateLimitedReporter {
    /// Create a reporter with the given interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_report: Mutex::new(None),
            pending: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }

    /// Record a failure and return a notice if one is due
    ///
    /// The notice is a single ASCII-safe line meant for the console sink.
    pub fn report(&self, sink: &str, error: &dyn Display) -> Option<String> {
        self.pending.fetch_add(1, Ordering::Relaxed);
        let total = self.total.fetch_add(1, Ordering::Relaxed) + 1;

        let due = {
            let mut last = self.last_report.lock();
            let now = Instant::now();
            match *last {
                Some(prev) if now.duration_since(prev) < self.min_interval => false,
                _ => {
                    *last = Some(now);
                    true
                }
            }
        };

        if !due {
            return None;
        }

        let count = self.pending.swap(0, Ordering::Relaxed);
        tracing::warn!(
            sink = %sink,
            error = %error,
            suppressed_count = count.saturating_sub(1),
            total_failures = total,
            "log sink failure"
        );

        let notice = if count > 1 {
            format!(
                "sink '{sink}' failed: {error} ({} similar failures suppressed, {total} total)",
                count - 1
            )
        } else {
            format!("sink '{sink}' failed: {error}")
        };
        Some(notice)
    }

}

impl Default for RateLimitedReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}
