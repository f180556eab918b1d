mod common;

use std::path::Path;
use std::sync::Mutex;

use adbcp::bridge::BridgeCommand;
use adbcp::error::TransferError;
use adbcp::logger::{Logger, NoopLogger};
use adbcp::transfer::{Executor, TransferDirection, TransferItem};
use common::{bridge_failure, s, write_file, FakeBridge};

#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<String>>,
}

impl Logger for RecordingLogger {
    fn start(&self, direction: TransferDirection, items: usize, dst: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {} {}", direction.as_str(), items, dst));
    }
    fn copy_done(&self, src: &str, _dst: &str, bytes: u64, _seconds: f64) {
        self.events.lock().unwrap().push(format!("copy {} {}", src, bytes));
    }
    fn error(&self, context: &str, path: &str, _msg: &str) {
        self.events.lock().unwrap().push(format!("error {} {}", context, path));
    }
    fn done(&self, ok: u64, failed: u64, bytes: u64, _seconds: f64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {} {}", ok, failed, bytes));
    }
}

fn file_item(path: &Path) -> TransferItem {
    TransferItem {
        source_path: s(path),
        name: path.file_name().unwrap().to_string_lossy().into_owned(),
        is_directory: false,
    }
}

#[test]
fn failed_item_does_not_abort_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.txt");
    let b = tmp.path().join("b.txt");
    let c = tmp.path().join("c.txt");
    write_file(&a, 10);
    write_file(&b, 20);
    write_file(&c, 30);

    let bridge = FakeBridge::new(|cmd| match cmd {
        BridgeCommand::Push { local, .. } if local.ends_with("b.txt") => {
            Err(bridge_failure("remote couldn't create file: Permission denied"))
        }
        _ => Ok(String::new()),
    });
    let logger = RecordingLogger::default();
    let executor = Executor::new(&bridge, &logger, false);
    let items = vec![file_item(&a), file_item(&b), file_item(&c)];

    let report = executor.transfer(&items, "/sdcard/Download", TransferDirection::PcToPhone);

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.failed(), 1);
    assert!(!report.outcomes[1].is_success());
    assert!(report.outcomes[2].is_success());
    assert_eq!(report.total_bytes(), 40);
    assert_eq!(bridge.transfer_calls(), 3);

    let lines: Vec<String> = report.outcomes.iter().map(|o| o.report_line()).collect();
    assert_eq!(lines.iter().filter(|l| l.starts_with('✗')).count(), 1);
    assert!(lines[0].starts_with("✓ a.txt - 10 B - "));
    assert!(lines[1].starts_with("✗ b.txt - Transfer failed: "));
    assert!(lines[1].contains("Permission denied"));

    let events = logger.events.lock().unwrap().clone();
    assert_eq!(events.first().unwrap(), "start pc-to-phone 3 /sdcard/Download");
    assert_eq!(events.last().unwrap(), "done 2 1 40");
    assert!(events.contains(&format!("error pc-to-phone {}", s(&b))));
}

#[test]
fn push_targets_destination_joined_with_name() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("album");
    write_file(&dir.join("1.jpg"), 100);
    write_file(&dir.join("nested/2.jpg"), 200);

    let bridge = FakeBridge::ok();
    let executor = Executor::new(&bridge, &NoopLogger, false);
    let items = vec![TransferItem {
        source_path: s(&dir),
        name: "album".into(),
        is_directory: true,
    }];

    let report = executor.transfer(&items, "/sdcard/Pictures/", TransferDirection::PcToPhone);

    assert_eq!(
        bridge.calls(),
        vec![BridgeCommand::Push {
            local: s(&dir),
            remote: "/sdcard/Pictures/album".into(),
        }]
    );
    assert_eq!(report.total_bytes(), 300);
    assert_eq!(report.outcomes[0].destination_path, "/sdcard/Pictures/album");
}

#[test]
fn pull_measures_after_copy() {
    let tmp = tempfile::tempdir().unwrap();
    let bridge = FakeBridge::new(|cmd| {
        if let BridgeCommand::Pull { remote, local } = cmd {
            if remote.ends_with(".bin") {
                write_file(Path::new(local), 42);
            } else {
                write_file(&Path::new(local).join("x/1.txt"), 5);
                write_file(&Path::new(local).join("2.txt"), 7);
            }
        }
        Ok(String::new())
    });
    let executor = Executor::new(&bridge, &NoopLogger, false);
    let items = vec![
        TransferItem {
            source_path: "/sdcard/Download/blob.bin".into(),
            name: "blob.bin".into(),
            is_directory: false,
        },
        TransferItem {
            source_path: "/sdcard/DCIM".into(),
            name: "DCIM".into(),
            is_directory: true,
        },
    ];

    let report = executor.transfer(&items, &s(tmp.path()), TransferDirection::PhoneToPc);

    assert_eq!(report.failed(), 0);
    let stats: Vec<u64> = report
        .outcomes
        .iter()
        .map(|o| o.result.as_ref().unwrap().bytes)
        .collect();
    assert_eq!(stats, vec![42, 12]);
    assert_eq!(
        bridge.calls()[0],
        BridgeCommand::Pull {
            remote: "/sdcard/Download/blob.bin".into(),
            local: s(&tmp.path().join("blob.bin")),
        }
    );
    for outcome in &report.outcomes {
        let speed = outcome.result.as_ref().unwrap().speed_mb_s;
        assert!(speed.is_finite());
    }
}

#[test]
fn failed_pull_is_a_bridge_error() {
    let tmp = tempfile::tempdir().unwrap();
    let bridge = FakeBridge::new(|_| Err(bridge_failure("remote object does not exist")));
    let executor = Executor::new(&bridge, &NoopLogger, false);
    let items = vec![TransferItem {
        source_path: "/sdcard/gone.txt".into(),
        name: "gone.txt".into(),
        is_directory: false,
    }];

    let report = executor.transfer(&items, &s(tmp.path()), TransferDirection::PhoneToPc);

    assert!(matches!(
        report.outcomes[0].result,
        Err(TransferError::Bridge(_))
    ));
}

#[test]
fn missing_local_file_fails_before_push() {
    let tmp = tempfile::tempdir().unwrap();
    let bridge = FakeBridge::ok();
    let executor = Executor::new(&bridge, &NoopLogger, false);
    let items = vec![file_item(&tmp.path().join("vanished.txt"))];

    let report = executor.transfer(&items, "/sdcard", TransferDirection::PcToPhone);

    assert!(matches!(
        report.outcomes[0].result,
        Err(TransferError::Measure { .. })
    ));
    assert_eq!(bridge.transfer_calls(), 0);
}
