mod common;

use assert_cmd::Command;
use common::{block, mixed_history, purchase, SnapshotFile, DAY, T0};
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tix_source_json::Snapshot;

const BIN_NAME: &str = "ticket_core_cli";

fn command(file: &SnapshotFile) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.arg("--config").arg(file.config_path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn scan_command(file: &SnapshotFile) -> Command {
    let mut cmd = command(file);
    cmd.arg("scan")
        .arg("--snapshot")
        .arg(file.path())
        .arg("--now")
        .arg((T0 + 30 * DAY).to_string());
    cmd
}

#[test]
fn scan_prints_plain_report() {
    let file = SnapshotFile::write(&mixed_history());
    scan_command(&file)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(contains("You have 5 tickets. 2 of them have voted."))
        .stdout(contains("Voted and paid").and(contains("Expired")))
        .stdout(contains("Mean time in the pool for live and immature tickets: 20.0 days."));
}

#[test]
fn scan_emits_json_report() {
    let file = SnapshotFile::write(&mixed_history());
    let output = scan_command(&file)
        .arg("--json")
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(report["current_height"], 100_000);
    assert_eq!(report["summary"]["ticket_count"], 5);
    assert_eq!(report["rows"][2]["status"], "Immature after vote");
    assert_eq!(report["rows"][1]["age"]["kind"], "to_vote");
}

#[test]
fn network_override_changes_classification() {
    let snapshot = Snapshot {
        current_height: 1_000,
        batches: vec![block(900, T0, vec![purchase(0x01)])],
    };
    let file = SnapshotFile::write(&snapshot);

    scan_command(&file)
        .args(["--no-color", "--network", "mainnet"])
        .assert()
        .success()
        .stdout(contains("Immature after inclusion in a block"));

    scan_command(&file)
        .args(["--no-color", "--network", "simnet"])
        .assert()
        .success()
        .stdout(contains("Status:          Live"));
}

#[test]
fn missing_snapshot_fails_with_error() {
    let file = SnapshotFile::write(&Snapshot::new(10));
    command(&file)
        .args(["scan", "--snapshot"])
        .arg(file.path().with_file_name("absent.json"))
        .assert()
        .failure()
        .stderr(contains("Snapshot error"));
}

#[test]
fn config_command_prints_effective_params() {
    let file = SnapshotFile::write(&Snapshot::new(10));
    command(&file)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("\"ticket_expiry\": 40960"));
}

#[test]
fn version_command_prints_version_info() {
    let file = SnapshotFile::write(&Snapshot::new(10));
    command(&file)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("ticket_core"));
}
