//! Integration tests for CLI commands.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{json, Value};
use tempfile::TempDir;

const EVENTS: &str = r#"{"event_type": "page_view", "page": "/courses", "user": {"id": 7, "name": "Señor"}}

{"event_type": "problem_check", "grades": [1.5, 2]}
"#;

fn write_events(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("events.jsonl");
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str], stdin: Option<&str>) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_track"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TRACK_NAME")
        .env_remove("TRACK_MAX_EVENT_SIZE")
        .env_remove("TRACK_ASCII_ONLY")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(text) = stdin {
            pipe.write_all(text.as_bytes()).unwrap();
        }
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

#[test]
fn test_encode_file() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir, EVENTS);

    let (success, stdout, _) = run_cli(&["encode", &path], None);
    assert!(success);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"event_type": "page_view", "page": "/courses", "user": {"id": 7, "name": "Señor"}}"#,
            r#"{"event_type": "problem_check", "grades": [1.5, 2]}"#,
        ]
    );
}

#[test]
fn test_encode_stdin_ascii_only() {
    let (success, stdout, _) = run_cli(
        &["encode", "--ascii-only"],
        Some("{\"test\": \"Ó é ñ\"}\n"),
    );
    assert!(success);
    assert_eq!(stdout.trim_end(), r#"{"test": "\u00d3 \u00e9 \u00f1"}"#);
}

#[test]
fn test_encode_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir, "{\"ok\": 1}\nnot json\n");

    let (success, _, stderr) = run_cli(&["encode", &path], None);
    assert!(!success);
    assert!(stderr.contains("line 2"));
}

#[test]
fn test_encode_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.jsonl");

    let (success, _, stderr) = run_cli(&["encode", &path.to_string_lossy()], None);
    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_send_writes_one_record_per_event() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir, EVENTS);

    let (success, stdout, _) = run_cli(&["send", &path, "--name", "track.cli.test"], None);
    assert!(success);

    let records: Vec<&str> = stdout.lines().filter(|l| l.contains("INFO")).collect();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.contains("track.cli.test")));
    assert!(records[0].contains(r#""page": "/courses""#));
    assert!(records[1].contains(r#""grades": [1.5, 2]"#));
}

#[test]
fn test_send_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir, "{\"test\": \"abcdefghijklmnopqrstuvwxyz\"}\n");
    let config = dir.path().join("track.toml");
    std::fs::write(&config, "name = \"from.config\"\nmax_event_size = 15\n").unwrap();

    let (success, stdout, _) = run_cli(
        &["send", &path, "--config", &config.to_string_lossy()],
        None,
    );
    assert!(success);
    assert!(stdout.contains("from.config"));
    assert!(stdout.contains(r#"{"test": "abcde"#));
    assert!(!stdout.contains("abcdef"));
}

#[test]
fn test_send_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir, "{\"n\": 1}\n");
    let config = dir.path().join("track.toml");
    std::fs::write(&config, "name = \"from.config\"\n").unwrap();

    let (success, stdout, _) = run_cli(
        &["send", &path, "--config", &config.to_string_lossy(), "--name", "from.flag"],
        None,
    );
    assert!(success);
    assert!(stdout.contains("from.flag"));
    assert!(!stdout.contains("from.config"));
}

#[test]
fn test_send_rejects_blank_name_flag() {
    let (success, stdout, stderr) = run_cli(&["send", "--name", " "], Some("{\"n\": 1}\n"));
    assert!(!success);
    assert!(stderr.contains("name must not be empty"));
    assert!(!stdout.contains("INFO"));
}

#[test]
fn test_encoded_output_parses_back() {
    let (success, stdout, _) = run_cli(
        &["encode"],
        Some("{\"b\": [true, null], \"a\": {\"c\": \"x\"}}\n"),
    );
    assert!(success);
    let parsed: Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(parsed, json!({"a": {"c": "x"}, "b": [true, null]}));
}
