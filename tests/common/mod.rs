// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_numstat")
}

/// Helper function to run numstat with given arguments and input via stdin
pub fn run_numstat_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    run_numstat_with_bytes(args, input.as_bytes())
}

/// Helper function to run numstat with raw bytes on stdin
pub fn run_numstat_with_bytes(args: &[&str], input: &[u8]) -> (String, String, i32) {
    let mut cmd = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start numstat");

    if let Some(mut stdin) = cmd.stdin.take() {
        stdin.write_all(input).expect("Failed to write to stdin");
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run numstat with explicit arguments and no stdin
pub fn run_numstat(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute numstat");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Create a temporary file with the given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}

/// Path of a temporary file as a string argument
pub fn path_arg(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().to_string()
}

/// Lines 1..=n, one number per line
pub fn sequence(n: usize) -> String {
    (1..=n).map(|i| format!("{}\n", i)).collect()
}
