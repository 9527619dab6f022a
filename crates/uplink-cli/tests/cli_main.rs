//! CLI tests for the uplink command-line host.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the CLI binary exists and shows help.
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("routes"));
}

/// Test that providing no subcommand shows an error.
#[test]
fn test_no_subcommand_shows_error() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.assert().failure().code(2);
}

#[test]
fn test_decode_environment() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.args([
        "decode",
        "--topic",
        "data/ABC123/environment",
        "--payload",
        r#"{"data":{"value":"Temp=21.5,Humid=60"}}"#,
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""sn":"ABC123""#))
        .stdout(predicate::str::contains(r#""温度":"21.5""#))
        .stdout(predicate::str::contains(r#""deviceType":"V2831""#));
}

#[test]
fn test_decode_payload_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payload.json");
    std::fs::write(&path, br#"{"alarmType":"overVoltage"}"#).unwrap();

    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.args(["decode", "--topic", "alarm/P7/power", "--payload-file"])
        .arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""sn":"P7""#))
        .stdout(predicate::str::contains("过电压"));
}

#[test]
fn test_decode_unmatched_topic() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.args(["decode", "--topic", "foo/bar", "--payload", "{}"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""attributes":{}"#))
        .stdout(predicate::str::contains("telemetry").not());
}

#[test]
fn test_decode_malformed_payload_fails() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.args(["decode", "--topic", "data/A/environment", "--payload", "{oops"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_decode_requires_payload() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.args(["decode", "--topic", "data/A/environment"]);
    cmd.assert().failure().code(2);
}

#[test]
fn test_routes_lists_rules_in_order() {
    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.arg("routes");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#0  data/(.+)/environment"))
        .stdout(predicate::str::contains("#4  alarm/(.+)/screen"));
}

#[test]
fn test_replay_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"payload":"{\"locks\":[{\"value\":\"lock\"}]}","metadata":{"topicName":"status/L/lock"}}"#,
            "\n",
            r#"{"payload":"broken","metadata":{"topicName":"status/L/lock"}}"#,
            "\n"
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("uplink").unwrap();
    cmd.args(["replay", "--iterations", "3", "--workers", "2", "--input"])
        .arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("total: 6, ok: 3, failed: 3"));
}
