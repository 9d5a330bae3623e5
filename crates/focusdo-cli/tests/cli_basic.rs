//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;
use std::sync::{Mutex, MutexGuard};

// Commands share one dev data directory; run each test's CLI calls
// under a process-wide lock so state does not interleave.
static CLI_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    CLI_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusdo-cli", "--"])
        .args(args)
        .env("FOCUSDO_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn timer_start_reports_work_phase() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["timer", "start"]);
    assert_eq!(code, 0, "timer start failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "TimerStarted");
    assert_eq!(event["phase"], "work");
}

#[test]
fn timer_status_is_valid_json() {
    let _guard = lock();
    let _ = run_cli(&["timer", "start"]);
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(snapshot["remaining_secs"].is_u64());
}

#[test]
fn timer_reset_lands_in_idle() {
    let _guard = lock();
    let _ = run_cli(&["timer", "start"]);
    let (_, _, code) = run_cli(&["timer", "reset"]);
    assert_eq!(code, 0, "timer reset failed");

    let (stdout, _, _) = run_cli(&["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["phase"], "idle");
    assert_eq!(snapshot["is_running"], false);
}

#[test]
fn skip_break_then_game_scores() {
    let _guard = lock();
    let _ = run_cli(&["timer", "start"]);
    let (_, _, code) = run_cli(&["timer", "skip-break"]);
    assert_eq!(code, 0, "skip-break failed");

    let (_, _, code) = run_cli(&["game", "start"]);
    assert_eq!(code, 0, "game start failed");

    let (stdout, _, code) = run_cli(&["game", "tap"]);
    assert_eq!(code, 0, "game tap failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "BreakGameScored");

    let (_, _, code) = run_cli(&["game", "end"]);
    assert_eq!(code, 0, "game end failed");
    let _ = run_cli(&["timer", "reset"]);
}

#[test]
fn game_refused_outside_break() {
    let _guard = lock();
    let _ = run_cli(&["timer", "reset"]);
    let (stdout, _, code) = run_cli(&["game", "start"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no break in progress"));
}

#[test]
fn task_add_and_list() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["task", "add", "E2E test task"]);
    assert_eq!(code, 0, "task add failed");
    assert!(stdout.contains("Task created:"));

    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "task list failed");
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(tasks.as_array().is_some_and(|t| !t.is_empty()));
}

#[test]
fn task_toggle_and_delete() {
    let _guard = lock();
    let (stdout, _, _) = run_cli(&["task", "add", "Toggle me"]);
    let json_start = stdout.find('{').unwrap();
    let task: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    let id = task["id"].as_str().unwrap();

    let (stdout, _, code) = run_cli(&["task", "toggle", id]);
    assert_eq!(code, 0, "task toggle failed");
    let toggled: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(toggled["is_completed"], true);

    let (stdout, _, code) = run_cli(&["task", "delete", id]);
    assert_eq!(code, 0, "task delete failed");
    assert!(stdout.contains("Task deleted:"));
}

#[test]
fn task_rejects_blank_title() {
    let _guard = lock();
    let (_, stderr, code) = run_cli(&["task", "add", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));
}

#[test]
fn config_get_set_roundtrip() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["config", "get", "timer.short_break_secs"]);
    assert_eq!(code, 0, "config get failed");
    let original = stdout.trim().to_string();

    let (_, _, code) = run_cli(&["config", "set", "timer.short_break_secs", "240"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, _) = run_cli(&["config", "get", "timer.short_break_secs"]);
    assert_eq!(stdout.trim(), "240");

    let _ = run_cli(&["config", "set", "timer.short_break_secs", &original]);
}

#[test]
fn config_list_is_toml() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(stdout.contains("[timer]"));
    assert!(stdout.contains("[game]"));
}

#[test]
fn config_get_unknown_key_fails() {
    let _guard = lock();
    let (_, _, code) = run_cli(&["config", "get", "timer.no_such_key"]);
    assert_ne!(code, 0);
}

#[test]
fn stats_commands_succeed() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "stats today failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());

    let (stdout, _, code) = run_cli(&["stats", "all"]);
    assert_eq!(code, 0, "stats all failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());

    let (_, _, code) = run_cli(&["stats", "recent", "--limit", "5"]);
    assert_eq!(code, 0, "stats recent failed");
}
