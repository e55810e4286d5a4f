//! End-to-end behavior of registries writing real files

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use fuellog::{
    ChannelMatch, DEFAULT_HEX_LIMIT, Direction, FileGroupConfig, LogConfig, LogLevel, Registry,
};
use parking_lot::Mutex;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn single_file(dir: &Path, group: FileGroupConfig) -> LogConfig {
    LogConfig::default()
        .with_directory(dir)
        .with_console_level(LogLevel::Critical)
        .with_files(vec![group])
}

fn lines_of(path: &Path, channel: &str) -> Vec<String> {
    let tag = format!("{channel:>20}]");
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| line.contains(&tag))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_repeated_lookup_writes_once() {
    let dir = TempDir::new().unwrap();
    let registry = Registry::with_console(LogConfig::default().with_directory(dir.path()), Box::new(io::sink()));

    for _ in 0..3 {
        let pumps = registry.channel("PumpMaster");
        fuellog::info!(pumps, "authorized nozzle {}", 2);
    }
    registry.flush();

    let lines = lines_of(&dir.path().join("pump_transactions.log"), "PumpMaster");
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.ends_with("INFO: authorized nozzle 2")));
}

#[test]
fn test_warning_hides_info_everywhere() {
    let dir = TempDir::new().unwrap();
    let capture = Capture::default();
    let config = LogConfig::default()
        .with_directory(dir.path())
        .with_level(LogLevel::Warning);
    let registry = Registry::with_console(config, Box::new(capture.clone()));

    let driver = registry.channel("driver");
    fuellog::info!(driver, "port opened");
    fuellog::error!(driver, "port lost");
    registry.flush();

    let file = lines_of(&dir.path().join("fuel_master.log"), "driver");
    assert_eq!(file.len(), 1);
    assert!(file[0].ends_with("ERROR: port lost"));

    let console = capture.text();
    let shown: Vec<&str> = console
        .lines()
        .filter(|l| l.contains("              driver]"))
        .collect();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].ends_with("ERROR: port lost"));
}

#[test]
fn test_summary_and_hex_lines() {
    let dir = TempDir::new().unwrap();
    let registry = Registry::with_console(LogConfig::default().with_directory(dir.path()), Box::new(io::sink()));

    let pumps = registry.channel("PumpMaster");
    fuellog::summarize(&pumps, 0x50, "CD1-RESET", "pump reset");
    fuellog::summarize_directional(&pumps, Direction::Rx, 0x50, "DC1-STATUS", "RESET");

    let driver = registry.channel("mekser.driver");
    let frame = [0x50, 0x30, 0x01, 0x01, 0x05, 0x9A, 0x2B, 0x03, 0xFA];
    fuellog::log_hex(&driver, LogLevel::Debug, "TX", &frame, DEFAULT_HEX_LIMIT);
    registry.flush();

    let tx = lines_of(&dir.path().join("pump_transactions.log"), "PumpMaster");
    assert_eq!(tx.len(), 2);
    assert!(tx[0].ends_with("INFO: PUMP 0x50: CD1-RESET pump reset"));
    assert!(tx[1].ends_with("INFO: <<< PUMP 0x50: DC1-STATUS RESET"));

    let wire = lines_of(&dir.path().join("driver_communication.log"), "mekser.driver");
    assert_eq!(wire.len(), 1);
    assert!(wire[0].ends_with("DEBUG: TX (9 bytes): 50300101059A2B03FA"));
}

#[test]
fn test_non_ascii_round_trips_through_files() {
    let dir = TempDir::new().unwrap();
    let capture = Capture::default();
    let config = LogConfig::default()
        .with_directory(dir.path())
        .with_console_level(LogLevel::Debug);
    let config = LogConfig {
        console_ascii_only: true,
        ..config
    };
    let registry = Registry::with_console(config, Box::new(capture.clone()));

    let message = "Колонка 0x50: налив 5.000 л, 225.00 ₽";
    fuellog::info!(registry.channel("PumpMaster"), "{message}");
    registry.flush();

    let bytes = fs::read(dir.path().join("pump_transactions.log")).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.ends_with(&format!("INFO: {message}\n")));

    let console = capture.text();
    assert!(console.is_ascii());
    assert!(console.contains("??????? 0x50: ????? 5.000 ?, 225.00 ?"));
}

#[test]
fn test_rotation_preserves_history() {
    let dir = TempDir::new().unwrap();
    let group = FileGroupConfig::new("driver", "driver_communication.log")
        .with_level(LogLevel::Debug)
        .with_rotation(400, 3)
        .with_match(ChannelMatch::Prefix("mekser.driver".into()));
    let registry = Registry::with_console(single_file(dir.path(), group), Box::new(io::sink()));

    let primary = dir.path().join("driver_communication.log");
    let backup = |i: usize| dir.path().join(format!("driver_communication.log.{i}"));
    let driver = registry.channel("mekser.driver");

    let mut rotations = 0;
    let mut previous = fs::read(&primary).unwrap();
    for seq in 0..60 {
        fuellog::debug!(driver, "RX seq={seq:03} frame=0250300101059A2B03FA");
        let current = fs::read(&primary).unwrap();
        if current.len() < previous.len() {
            rotations += 1;
            assert_eq!(fs::read(backup(1)).unwrap(), previous, "rotation {rotations}");
        }
        assert!(current.len() <= 400);
        previous = current;
    }

    assert!(rotations > 3);
    for i in 1..=3 {
        assert!(backup(i).exists());
    }
    assert!(!backup(4).exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_callers_write_whole_lines() {
    let dir = TempDir::new().unwrap();
    let group = FileGroupConfig::new("system", "fuel_master.log").with_rotation(64 * 1024 * 1024, 1);
    let registry = Arc::new(Registry::with_console(
        single_file(dir.path(), group),
        Box::new(io::sink()),
    ));

    let tasks: Vec<_> = ["PumpMaster", "mekser.driver"]
        .into_iter()
        .map(|name| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let channel = registry.channel(name);
                for seq in 0..1000 {
                    fuellog::info!(channel, "seq={seq:04} payload=0150010305");
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    registry.flush();

    let path = dir.path().join("fuel_master.log");
    let pumps = lines_of(&path, "PumpMaster");
    let driver = lines_of(&path, "mekser.driver");
    assert_eq!(pumps.len() + driver.len(), 2000);
    for line in pumps.iter().chain(&driver) {
        assert!(line.ends_with(" payload=0150010305"), "torn line: {line:?}");
    }

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with('\n'));
}

#[test]
fn test_reconfigure_switches_files_without_duplicates() {
    let dir = TempDir::new().unwrap();
    let registry = Registry::with_console(
        LogConfig::default().with_directory(dir.path().join("first")),
        Box::new(io::sink()),
    );
    let pumps = registry.channel("PumpMaster");
    fuellog::info!(pumps, "before");

    let moved = registry.config().with_directory(dir.path().join("second"));
    assert!(registry.reconfigure(moved.clone()));
    assert!(!registry.reconfigure(moved));
    fuellog::info!(pumps, "after");
    registry.flush();

    let first = lines_of(&dir.path().join("first/pump_transactions.log"), "PumpMaster");
    let second = lines_of(&dir.path().join("second/pump_transactions.log"), "PumpMaster");
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert!(second[0].ends_with("after"));
    assert_eq!(pumps.sink_names(), vec!["console", "system", "transactions"]);
}
