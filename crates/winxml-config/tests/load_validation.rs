//! Config load validation tests for winxml-config.
// crates/winxml-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tempfile::TempDir;
use winxml_config::ConfigError;
use winxml_config::WinXmlConfig;
use winxml_descriptor::UnknownKeyPolicy;

mod common;

type TestResult = Result<(), String>;

fn write_config(content: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_reads_explicit_file() -> TestResult {
    let file = write_config(b"[validation]\nunknown_keys = \"ignore\"\nmax_input_bytes = 4096\n")?;
    let config = WinXmlConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.validation.unknown_keys != UnknownKeyPolicy::Ignore
        || config.validation.max_input_bytes != 4096
    {
        return Err(format!("unexpected config: {config:?}"));
    }
    Ok(())
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let missing = dir.path().join("absent.toml");
    match WinXmlConfig::load(Some(&missing)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    common::assert_invalid(
        WinXmlConfig::load(Some(Path::new(&long_path))),
        "config path exceeds max length",
    )
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    common::assert_invalid(
        WinXmlConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let file = write_config(&vec![b'#'; 1_048_577])?;
    common::assert_invalid(WinXmlConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let file = write_config(&[0xFF, 0xFE, 0xFF])?;
    common::assert_invalid(WinXmlConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let file = write_config(b"[validation\n")?;
    match WinXmlConfig::load(Some(file.path())) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn load_rejects_unknown_fields() -> TestResult {
    for content in ["[server]\nbind = \"x\"\n", "[validation]\nstrict = true\n"] {
        let file = write_config(content.as_bytes())?;
        match WinXmlConfig::load(Some(file.path())) {
            Err(ConfigError::Parse(_)) => {}
            other => return Err(format!("expected parse error for {content:?}, got {other:?}")),
        }
    }
    Ok(())
}
