//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Nothing here
//! talks to a real backend.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command with the given stdin and extra environment, and return
/// (stdout, stderr, code).
fn run_cli_with(args: &[&str], input: &str, envs: &[(&str, &str)]) -> (String, String, i32) {
    let mut child = Command::new("cargo")
        .args(["run", "-q", "-p", "insight-cli", "--"])
        .args(args)
        .env("INSIGHT_ENV", "dev")
        .env_remove("RUST_LOG")
        .env_remove("INSIGHT_API_URL")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    run_cli_with(args, input, &[])
}

fn run_cli(args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(args, "")
}

/// A throwaway HOME whose dev config file holds `content`.
fn home_with_config(content: &str) -> tempfile::TempDir {
    let home = tempfile::tempdir().expect("temp HOME");
    let dir = home.path().join(".config").join("insight-dev");
    std::fs::create_dir_all(&dir).expect("config dir");
    std::fs::write(dir.join("config.toml"), content).expect("config file");
    home
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("JSON line"))
        .collect()
}

#[test]
fn test_help_lists_commands() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for command in ["timer", "feynman", "analyze", "history", "logout", "config"] {
        assert!(stdout.contains(command), "help is missing '{command}'");
    }
}

#[test]
fn test_countdown_rejects_zero_duration() {
    let (_, stderr, code) = run_cli(&["timer", "countdown", "--hours", "0", "--minutes", "0", "--seconds", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("greater than zero"));
}

#[test]
fn test_countdown_rejects_out_of_range_field() {
    let (_, _, code) = run_cli(&["timer", "countdown", "--minutes", "75"]);
    assert_ne!(code, 0);
}

#[test]
fn test_countdown_runs_to_completion() {
    let (stdout, stderr, code) = run_cli(&["timer", "countdown", "--seconds", "1", "--json"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let lines = json_lines(&stdout);
    assert_eq!(lines[0]["type"], "CountdownStarted");
    assert!(lines.iter().any(|l| l["type"] == "GeneralTimerFinished"));
    let snapshot = lines.last().unwrap();
    assert_eq!(snapshot["countdown"]["remaining_secs"], 0);
    assert_eq!(snapshot["countdown"]["display"], "00:00:00");

    // Default log filter lets core info events through.
    assert!(stderr.contains("general timer finished"));
}

#[test]
fn test_pomodoro_start_switch_quit() {
    let (stdout, stderr, code) = run_cli_with_input(&["timer", "pomodoro", "--json"], "p\ns\nq\n");
    assert_eq!(code, 0, "stderr: {stderr}");
    let lines = json_lines(&stdout);
    assert!(lines.iter().any(|l| l["type"] == "CountdownStarted"));
    let switched = lines
        .iter()
        .find(|l| l["type"] == "PomodoroModeSwitched")
        .expect("mode switch event");
    assert_eq!(switched["from"], "work");
    assert_eq!(switched["to"], "shortBreak");

    let snapshot = lines.last().unwrap();
    assert_eq!(snapshot["completed_cycles"], 0);
    assert_eq!(snapshot["mode"], "shortBreak");
    assert_eq!(snapshot["display"], "05:00");
}

#[test]
fn test_malformed_config_is_reported() {
    let home = home_with_config("api = [");
    let home_path = home.path().to_str().unwrap();

    let (_, stderr, code) = run_cli_with(
        &["timer", "countdown", "--seconds", "1", "--json"],
        "",
        &[("HOME", home_path)],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to load configuration"), "stderr: {stderr}");

    let (_, stderr, code) = run_cli_with(&["history"], "", &[("HOME", home_path)]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to load configuration"), "stderr: {stderr}");
}

#[test]
fn test_unreachable_backend_fails_history_and_logout() {
    let home = tempfile::tempdir().unwrap();
    let envs = [
        ("HOME", home.path().to_str().unwrap()),
        ("INSIGHT_API_URL", "http://127.0.0.1:9"),
    ];

    for command in ["history", "logout"] {
        let (stdout, stderr, code) = run_cli_with(&[command], "", &envs);
        assert_eq!(code, 1, "{command} stderr: {stderr}");
        assert!(stderr.contains("error: "), "{command} stderr: {stderr}");
        assert!(stdout.is_empty());
    }
}

#[test]
fn test_feynman_rejects_blank_then_completes() {
    let input = "   \nGravity\nThings fall because mass attracts mass.\n\nWhy orbits do not fall in.\n\nOrbits are falling sideways fast enough.\n\n";
    let (stdout, stderr, code) = run_cli_with_input(&["feynman", "--json"], input);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("is required"));

    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("JSON summary");
    assert_eq!(summary["concept"], "Gravity");
    assert_eq!(summary["entries"].as_array().unwrap().len(), 4);
    assert_eq!(summary["entries"][1]["title"], "Teach It Simply");
    assert_eq!(
        summary["entries"][3]["answer"],
        "Orbits are falling sideways fast enough."
    );
}

#[test]
fn test_feynman_incomplete_input_fails() {
    let (_, _, code) = run_cli_with_input(&["feynman"], "Gravity\n");
    assert_ne!(code, 0);
}

#[test]
fn test_analyze_rejects_malformed_url() {
    let (_, stderr, code) = run_cli(&["analyze", "url", "not a url", "--answers", "Rust, deep, 1 month"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid URL"));
    assert!(stderr.contains("https://example.com/article"));
}

#[test]
fn test_analyze_questions() {
    let (stdout, _, code) = run_cli(&["analyze", "questions"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_config_get_known_and_unknown_keys() {
    let (stdout, _, code) = run_cli(&["config", "get", "api.timeout_secs"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().parse::<u64>().is_ok());

    let (_, stderr, code) = run_cli(&["config", "get", "api.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
