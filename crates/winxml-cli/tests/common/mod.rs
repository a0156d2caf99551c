// crates/winxml-cli/tests/common/mod.rs
// =============================================================================
// Module: CLI Test Helpers
// Description: Shared helpers for running the win-xml binary.
// Purpose: Run every command in an isolated working directory.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

/// Returns the path to the compiled `win-xml` binary.
pub fn win_xml_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_win-xml"))
}

/// Runs the binary inside `dir` with no config override in the environment.
pub fn run_in(dir: &Path, args: &[&str]) -> Result<Output, String> {
    Command::new(win_xml_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("WIN_XML_CONFIG")
        .output()
        .map_err(|err| format!("failed to run win-xml: {err}"))
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf, String> {
    let path = dir.join(name);
    fs::write(&path, content).map_err(|err| format!("failed to write {name}: {err}"))?;
    Ok(path)
}

/// Parses captured stdout as JSON.
pub fn stdout_json(output: &Output) -> Result<serde_json::Value, String> {
    serde_json::from_slice(&output.stdout).map_err(|err| {
        format!("stdout is not json ({err}): {}", String::from_utf8_lossy(&output.stdout))
    })
}
