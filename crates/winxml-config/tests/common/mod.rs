// crates/winxml-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for winxml-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use winxml_config::ConfigError;
use winxml_config::WinXmlConfig;

/// Parses a TOML string into a `WinXmlConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<WinXmlConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Asserts that a config result failed with a message containing `needle`.
pub fn assert_invalid(
    result: Result<WinXmlConfig, ConfigError>,
    needle: &str,
) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
