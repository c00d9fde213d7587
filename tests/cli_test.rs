use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};

/// Runs the `freqi` binary with `args`, feeding `stdin` to it.
fn freqi(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_freqi"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start freqi");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "freqi failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_scale_from_stdin() {
    let output = freqi(&["scale", "-"], r#"{ "intervals": [0, 12], "startFreq": 220 }"#);
    assert_eq!(stdout_json(&output), json!([220.0, 440.0]));
}

#[test]
fn test_rejected_config_fails() {
    let output = freqi(&["scale", "-"], r#"{ "intervals": [0], "startFreq": -1 }"#);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("startFreq"), "{}", stderr);
}

#[test]
fn test_huge_count_fails_cleanly() {
    let output = freqi(&["augment", "-"], r#"{
        "originalArray": [0, 3, 5],
        "difference": 1e19,
        "amountToAdd": 12,
        "repeatMultiple": 0
    }"#);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("difference"), "{}", stderr);
}

#[test]
fn test_invalid_json_fails() {
    let output = freqi(&["freq", "-"], "{ not json");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_octaves_defaults_without_config() {
    let output = freqi(&["octaves"], "");
    let out = stdout_json(&output);
    assert_eq!(out["centreFreqIndex"], json!(12));
    assert_eq!(out["scale"].as_array().unwrap().len(), 25);
}

#[test]
fn test_freq_from_stdin() {
    let config = r#"{ "startFreq": 440, "numSemitones": 12, "interval": 12 }"#;
    let output = freqi(&["freq", "-"], config);
    assert_eq!(stdout_json(&output).as_f64(), Some(880.0));
}

#[test]
fn test_notes() {
    let output = freqi(&["notes"], "");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "C C# D D# E F F# G G# A A# B"
    );
}
