//! Sink utilities
//!
//! - **size_rotation**: size-bounded rollover with numbered backups
//! - **rate_limited_reporter**: one failure notice per interval, with counts

pub mod rate_limited_reporter;
pub mod size_rotation;

pub use rate_limited_reporter::{DEFAULT_REPORT_INTERVAL, RateLimitedReporter};
pub use size_rotation::{SizePolicy, backup_path, shift_backups};
