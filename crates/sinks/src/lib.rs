//! FuelMaster logging - Sinks
//!
//! Output destinations for formatted log lines.
//!
//! # Architecture
//!
//! Every sink implements [`Sink`]: it receives one already-formatted line at
//! a time and writes it whole, under its own lock. Sinks never decide routing;
//! the registry attaches them to channels and the channel filters by level.
//!
//! ```text
//! [Channel] --line--> [ConsoleSink]       --> stderr (UTF-8, ASCII fallback)
//!           --line--> [RotatingFileSink]  --> logs/fuel_master.log (+ .1 .. .N)
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Purpose | Rotation |
//! |------|---------|----------|
//! | `console` | Operator terminal | No |
//! | `rotating_file` | Persistent diagnostics | Size + count |

/// Console sink - stderr with encoding fallback
pub mod console;

/// Rotating file sink - size-bounded UTF-8 files
pub mod rotating_file;

/// Shared utilities (size rotation, failure reporting)
pub mod util;

/// Common types shared by all sinks (trait, errors, metrics)
mod common;

pub use common::{MetricsSnapshot, Result, Sink, SinkError, SinkMetrics};
pub use console::{ConsoleSink, ascii_lossy};
pub use rotating_file::{RotatingFileConfig, RotatingFileSink};
