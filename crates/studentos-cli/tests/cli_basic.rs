//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temporary
//! directory, so config and data never touch the real user profile.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studentos"))
        .args(args)
        .env("HOME", home)
        .env_remove("STUDENTOS_ENV")
        .env("STUDENTOS_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_task_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    let task = run_json(
        home.path(),
        &["task", "add", "Lab report", "--type", "assignment", "--priority", "high", "--due", "2030-01-15"],
    );
    assert_eq!(task["title"], "Lab report");
    assert_eq!(task["type"], "assignment");
    assert_eq!(task["priority"], "high");
    assert!(task["dueDate"].is_string());

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);

    let notifications = run_json(home.path(), &["notify", "list", "--unread"]);
    assert_eq!(notifications[0]["title"], "New task added");
}

#[test]
fn test_task_complete_and_delete() {
    let home = tempfile::tempdir().unwrap();
    let task = run_json(home.path(), &["task", "add", "Quiz prep"]);
    let id = task["id"].as_str().unwrap();

    let done = run_json(home.path(), &["task", "complete", id]);
    assert_eq!(done["completed"], true);
    assert!(done["completedAt"].is_string());

    let open = run_json(home.path(), &["task", "list"]);
    assert!(open.as_array().unwrap().is_empty());

    let (stdout, _, code) = run_cli(home.path(), &["task", "delete", id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task deleted"));

    let (_, stderr, code) = run_cli(home.path(), &["task", "delete", id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Task not found"));
}

#[test]
fn test_task_update_with_invalid_value_fails() {
    let home = tempfile::tempdir().unwrap();
    let task = run_json(home.path(), &["task", "add", "Essay"]);
    let id = task["id"].as_str().unwrap();

    let updated = run_json(home.path(), &["task", "update", id, "--set", "estimatedHours=3"]);
    assert_eq!(updated["estimatedHours"], 3.0);

    let (_, stderr, code) = run_cli(home.path(), &["task", "update", id, "--set", "priority=urgent"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_course_attendance_stats() {
    let home = tempfile::tempdir().unwrap();
    let course = run_json(home.path(), &["course", "add", "Operating Systems", "CS301"]);
    let id = course["id"].as_str().unwrap();

    for flag in [None, None, None, Some("--absent")] {
        let mut args = vec!["course", "attend", id];
        args.extend(flag);
        run_json(home.path(), &args);
    }

    let stats = run_json(home.path(), &["course", "stats", id]);
    assert_eq!(stats["attended"], 3);
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["percentage"], 75);
    assert_eq!(stats["canSkip"], 0);
    assert_eq!(stats["mustAttend"], 0);
}

#[test]
fn test_habit_done_starts_streak() {
    let home = tempfile::tempdir().unwrap();
    let habit = run_json(home.path(), &["habit", "add", "Read 20 pages"]);
    let id = habit["id"].as_str().unwrap();

    let habit = run_json(home.path(), &["habit", "done", id]);
    assert_eq!(habit["currentStreak"], 1);
    assert_eq!(habit["longestStreak"], 1);
}

#[test]
fn test_timetable_slot_is_replaced() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["timetable", "add", "1", "1", "Operating Systems"]);
    run_json(home.path(), &["timetable", "add", "1", "1", "Networks Lab", "--type", "lab"]);

    let entries = run_json(home.path(), &["timetable", "list"]);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Networks Lab");
    assert_eq!(entries[0]["start"], "08:30");

    let slots = run_json(home.path(), &["timetable", "slots"]);
    assert_eq!(slots.as_array().unwrap().len(), 7);
}

#[test]
fn test_settings_set_and_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let settings = run_json(home.path(), &["settings", "set", "backlogBurnerTone=savage"]);
    assert_eq!(settings["backlogBurnerTone"], "savage");

    let (_, stderr, code) = run_cli(home.path(), &["settings", "set", "volume=3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown setting"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "reminders.interval_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "reminders.interval_secs", "30"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "reminders.interval_secs"]);
    assert_eq!(stdout.trim(), "30");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "reminders.interval_secs", "soon"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_remind_once_reports_overdue_task() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["task", "add", "Essay", "--due", "2020-01-01T09:00:00Z"]);

    let fired = run_json(home.path(), &["remind", "once"]);
    assert_eq!(fired[0]["kind"], "taskOverdue");

    let backlog = run_json(home.path(), &["task", "backlog"]);
    assert_eq!(backlog[0]["task"]["title"], "Essay");
    assert!(backlog[0]["daysOverdue"].as_i64().unwrap() >= 30);
}

#[test]
fn test_dashboard_views() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["course", "add", "Operating Systems", "CS301"]);
    let load = run_json(home.path(), &["dashboard", "bandwidth"]);
    assert_eq!(load["totalLoad"], 2.0);
    assert_eq!(load["maxLoad"], 100.0);

    let grid = run_json(home.path(), &["dashboard", "heatmap", "--days", "7"]);
    assert_eq!(grid.as_array().unwrap().len(), 7);

    let upcoming = run_json(home.path(), &["dashboard", "upcoming"]);
    assert!(upcoming.as_array().unwrap().is_empty());

    let (stdout, _, code) = run_cli(home.path(), &["dashboard", "panic", "1", "4"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("PANIC MODE"));
}

#[test]
fn test_data_clear_requires_confirmation() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["task", "add", "Essay"]);

    let (_, _, code) = run_cli(home.path(), &["data", "clear"]);
    assert_eq!(code, 1);

    let (stdout, _, code) = run_cli(home.path(), &["data", "clear", "--yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cleared 1"));

    let tasks = run_json(home.path(), &["task", "list"]);
    assert!(tasks.as_array().unwrap().is_empty());
}
