//! Tests for common sink types

use std::io;

use crate::{MetricsSnapshot, SinkError, SinkMetrics};

#[test]
fn test_metrics_new() {
    let metrics = SinkMetrics::new();
    assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
}

#[test]
fn test_metrics_line_written() {
    let metrics = SinkMetrics::new();

    metrics.line_written(10);
    metrics.line_written(32);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.lines_written, 2);
    assert_eq!(snapshot.bytes_written, 42);
}

#[test]
fn test_metrics_failures() {
    let metrics = SinkMetrics::new();

    metrics.write_error();
    metrics.write_error();
    metrics.fallback();
    metrics.rotation();
    metrics.rotation_failure();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.write_errors, 2);
    assert_eq!(snapshot.fallbacks, 1);
    assert_eq!(snapshot.rotations, 1);
    assert_eq!(snapshot.rotation_failures, 1);
}

#[test]
fn test_error_messages() {
    let err = SinkError::open("logs/fuel_master.log", io::Error::other("denied"));
    assert!(err.to_string().contains("logs/fuel_master.log"));
    assert!(err.to_string().contains("denied"));

    let err = SinkError::rotate("logs/a.log", io::Error::other("busy"));
    assert!(err.to_string().contains("appending to current file"));

    let err = SinkError::encoding("console", "broken pipe");
    assert!(err.to_string().contains("console"));
    assert!(err.to_string().contains("dropped a line"));
}
