use super::*;
use crate::util::backup_path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn sink_in(dir: &TempDir, max_bytes: u64, backups: usize) -> RotatingFileSink {
    let config = RotatingFileConfig::new(dir.path().join("driver_communication.log"))
        .with_rotation(max_bytes, backups);
    RotatingFileSink::open("driver", config).unwrap()
}

// =============================================================================
// Config tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = RotatingFileConfig::new("logs/fuel_master.log");
    assert_eq!(config.path, PathBuf::from("logs/fuel_master.log"));
    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.max_bytes, 10 * 1024 * 1024);
    assert_eq!(config.backup_count, 5);
}

#[test]
fn test_config_chained_builders() {
    let config = RotatingFileConfig::new("a.log")
        .with_level(LogLevel::Info)
        .with_rotation(4096, 2);

    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.max_bytes, 4096);
    assert_eq!(config.backup_count, 2);
}

// =============================================================================
// Write tests
// =============================================================================

#[test]
fn test_open_creates_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("logs").join("fuel_master.log");

    let sink = RotatingFileSink::open("system", RotatingFileConfig::new(&path)).unwrap();

    assert!(path.exists());
    assert_eq!(sink.path(), path.as_path());
    assert_eq!(sink.name(), "system");
}

#[test]
fn test_open_fails_when_directory_is_a_file() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("logs");
    fs::write(&blocker, "not a directory").unwrap();

    let result = RotatingFileSink::open(
        "system",
        RotatingFileConfig::new(blocker.join("fuel_master.log")),
    );
    assert!(matches!(result, Err(SinkError::Open { .. })));
}

#[test]
fn test_write_lines() {
    let dir = TempDir::new().unwrap();
    let sink = sink_in(&dir, 1024 * 1024, 3);

    sink.write_line("TX 0150010305").unwrap();
    sink.write_line("RX 0150010101").unwrap();
    sink.flush().unwrap();

    let content = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(content, "TX 0150010305\nRX 0150010101\n");

    let metrics = sink.metrics();
    assert_eq!(metrics.lines_written, 2);
    assert_eq!(metrics.bytes_written, content.len() as u64);
}

#[test]
fn test_reopen_appends() {
    let dir = TempDir::new().unwrap();
    {
        let sink = sink_in(&dir, 1024, 3);
        sink.write_line("first session").unwrap();
    }
    let sink = sink_in(&dir, 1024, 3);
    sink.write_line("second session").unwrap();

    let content = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(content, "first session\nsecond session\n");
}

#[test]
fn test_non_ascii_round_trips() {
    let dir = TempDir::new().unwrap();
    let sink = sink_in(&dir, 1024 * 1024, 3);

    let line = "Колонка 0x50: налив 5.000 L, 225.00 ₽ (ß, 油)";
    sink.write_line(line).unwrap();

    let bytes = fs::read(sink.path()).unwrap();
    let mut expected = line.as_bytes().to_vec();
    expected.push(b'\n');
    assert_eq!(bytes, expected);
}

#[test]
fn test_level() {
    let dir = TempDir::new().unwrap();
    let config = RotatingFileConfig::new(dir.path().join("tx.log")).with_level(LogLevel::Info);
    let sink = RotatingFileSink::open("transactions", config).unwrap();

    assert_eq!(sink.level(), LogLevel::Info);
    assert_eq!(sink.config().level, LogLevel::Info);
}

// =============================================================================
// Rotation tests
// =============================================================================

#[test]
fn test_rotation_keeps_exact_backup_count() {
    let dir = TempDir::new().unwrap();
    // Each line is 9 bytes with its newline; two lines fill a file
    let sink = sink_in(&dir, 20, 3);

    let lines: Vec<String> = (0..12).map(|i| format!("line-{i:03}")).collect();
    for line in &lines {
        sink.write_line(line).unwrap();
    }

    let primary = sink.path().to_path_buf();
    assert_eq!(fs::read_to_string(&primary).unwrap(), "line-010\nline-011\n");
    assert_eq!(
        fs::read_to_string(backup_path(&primary, 1)).unwrap(),
        "line-008\nline-009\n"
    );
    assert_eq!(
        fs::read_to_string(backup_path(&primary, 2)).unwrap(),
        "line-006\nline-007\n"
    );
    assert_eq!(
        fs::read_to_string(backup_path(&primary, 3)).unwrap(),
        "line-004\nline-005\n"
    );
    assert!(!backup_path(&primary, 4).exists());

    let files = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 4, "primary plus exactly three backups");

    assert_eq!(sink.metrics().rotations, 5);
}

#[test]
fn test_primary_never_exceeds_threshold() {
    let dir = TempDir::new().unwrap();
    let sink = sink_in(&dir, 100, 2);

    for i in 0..50 {
        sink.write_line(&format!("frame {i}: 02 50 30 01 01 05 03")).unwrap();
        let size = fs::metadata(sink.path()).unwrap().len();
        assert!(size <= 100, "primary grew to {size} bytes");
    }
}

#[test]
fn test_oversized_line_written_whole() {
    let dir = TempDir::new().unwrap();
    let sink = sink_in(&dir, 16, 2);

    let big = "X".repeat(64);
    sink.write_line(&big).unwrap();

    assert_eq!(fs::read_to_string(sink.path()).unwrap(), format!("{big}\n"));
    assert_eq!(sink.metrics().rotations, 0, "empty primary is not rolled");
}

#[test]
fn test_zero_backups_never_rotates() {
    let dir = TempDir::new().unwrap();
    let sink = sink_in(&dir, 10, 0);

    for i in 0..5 {
        sink.write_line(&format!("line {i}")).unwrap();
    }

    assert_eq!(fs::read_to_string(sink.path()).unwrap().lines().count(), 5);
    assert!(!backup_path(sink.path(), 1).exists());
}

#[cfg(unix)]
#[test]
fn test_rotation_failure_keeps_appending() {
    let dir = TempDir::new().unwrap();
    let sink = sink_in(&dir, 20, 2);
    sink.write_line("line-000").unwrap();
    sink.write_line("line-001").unwrap();

    // A directory where the oldest backup should be cannot be removed
    fs::create_dir(backup_path(sink.path(), 2)).unwrap();

    let result = sink.write_line("line-002");
    assert!(matches!(result, Err(SinkError::Rotate { .. })));

    let content = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(content, "line-000\nline-001\nline-002\n");
    assert_eq!(sink.metrics().rotation_failures, 1);

    // Further writes append without retrying every line
    sink.write_line("line-003").unwrap();
    assert!(fs::read_to_string(sink.path()).unwrap().ends_with("line-003\n"));
}

// =============================================================================
// Concurrency tests
// =============================================================================

#[test]
fn test_concurrent_writers_with_rotation() {
    let dir = TempDir::new().unwrap();
    let sink = Arc::new(sink_in(&dir, 4096, 100));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..250 {
                    sink.write_line(&format!("writer={t} seq={i:04} payload=0150010305"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut all = Vec::new();
    all.push(fs::read_to_string(sink.path()).unwrap());
    for index in 1..=100 {
        if let Ok(content) = fs::read_to_string(backup_path(sink.path(), index)) {
            all.push(content);
        }
    }

    let lines: Vec<&str> = all.iter().flat_map(|c| c.lines()).collect();
    assert_eq!(lines.len(), 1000);
    for line in lines {
        assert!(line.starts_with("writer="), "torn line: {line:?}");
        assert!(line.ends_with("payload=0150010305"), "torn line: {line:?}");
    }
    for content in &all {
        assert!(content.is_empty() || content.ends_with('\n'));
    }
}
