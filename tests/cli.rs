//! Integration tests for the `lvlog` binary.

use std::process::{Command, Output, Stdio};

fn lvlog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lvlog"))
        .env_remove("LVLOG_LEVEL")
        .env_remove("LVLOG_FORMAT")
        .env_remove("LVLOG_TIME_FORMAT")
        .env_remove("LVLOG_ANSI")
        .args(args)
        .output()
        .expect("Failed to run lvlog")
}

#[test]
fn info_goes_to_stdout() {
    let output = lvlog(&["--time-format", "TS", "info", "count=5"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[TS][INFO]: count=5\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn error_goes_to_stderr() {
    let output = lvlog(&["--time-format", "TS", "error", "disk", "full"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(String::from_utf8_lossy(&output.stderr), "[TS][ERROR]: disk full\n");
}

#[test]
fn debug_is_filtered_by_default() {
    let output = lvlog(&["debug", "hidden"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn verbose_count_enables_debug() {
    let output = lvlog(&["-vvvv", "--time-format", "TS", "debug", "shown"]);

    assert_eq!(String::from_utf8_lossy(&output.stdout), "[TS][DEBUG]: shown\n");
}

#[test]
fn level_off_silences_errors() {
    let output = lvlog(&["--level", "off", "error", "quiet"]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn json_output_is_one_valid_line() {
    let output = lvlog(&["--format", "json", "error", "bad", "\"input\""]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stderr.lines().count(), 1);
    let json: serde_json::Value = serde_json::from_str(&stderr).expect("stderr should be valid JSON");
    assert_eq!(json["level"], "error");
    assert_eq!(json["stream"], "stderr");
    assert_eq!(json["message"], "bad \"input\"");
    assert!(json["time"].is_string());
}

#[test]
fn env_configures_defaults() {
    let output = Command::new(env!("CARGO_BIN_EXE_lvlog"))
        .env("LVLOG_LEVEL", "warning")
        .env("LVLOG_FORMAT", "json")
        .env_remove("LVLOG_TIME_FORMAT")
        .env_remove("LVLOG_ANSI")
        .args(["info", "dropped"])
        .output()
        .expect("Failed to run lvlog");
    assert!(output.stdout.is_empty());

    let output = Command::new(env!("CARGO_BIN_EXE_lvlog"))
        .env("LVLOG_LEVEL", "warning")
        .env("LVLOG_FORMAT", "json")
        .env_remove("LVLOG_TIME_FORMAT")
        .env_remove("LVLOG_ANSI")
        .args(["warning", "kept"])
        .output()
        .expect("Failed to run lvlog");
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(json["level"], "warning");
    assert_eq!(json["message"], "kept");
}

#[test]
fn usage_errors_exit_with_two() {
    let output = lvlog(&["shout", "hello"]);
    assert_eq!(output.status.code(), Some(2));
}

#[cfg(unix)]
#[test]
fn closed_stdout_reports_on_stderr() {
    let (reader, writer) = std::io::pipe().expect("Failed to create pipe");
    drop(reader);

    let output = Command::new(env!("CARGO_BIN_EXE_lvlog"))
        .env_remove("LVLOG_LEVEL")
        .env_remove("LVLOG_FORMAT")
        .env_remove("LVLOG_ANSI")
        .args(["--time-format", "TS", "info", "lost"])
        .stdout(writer)
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to run lvlog");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("[TS][ERROR]: write to stdout failed: Can't write stdout: "),
        "{stderr}"
    );
    assert!(stderr.contains("Broken pipe"), "{stderr}");
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
}
