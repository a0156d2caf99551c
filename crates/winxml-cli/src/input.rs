// crates/winxml-cli/src/input.rs
// ============================================================================
// Module: Caller Input Decoding
// Description: Decode JSON, YAML, or TOML input files into argument maps.
// Purpose: Give validation a single JSON object regardless of input format.
// Dependencies: serde_json, serde_yaml, toml
// ============================================================================

//! ## Overview
//! Input files hold one mapping of module arguments. The format is taken
//! from an explicit flag or inferred from the file extension; JSON is the
//! fallback. Any top-level value other than a mapping is rejected.

use std::fmt;
use std::path::Path;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// Supported caller input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON object.
    Json,
    /// YAML mapping.
    Yaml,
    /// TOML table.
    Toml,
}

impl InputFormat {
    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Returns the format label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures decoding caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Input bytes are not utf-8.
    #[error("input must be utf-8")]
    Utf8,
    /// Input could not be parsed in the selected format.
    #[error("invalid {format} input: {message}")]
    Parse {
        /// Selected format.
        format: InputFormat,
        /// Parser message.
        message: String,
    },
    /// Input parsed but is not a mapping.
    #[error("{format} input must be a mapping of module arguments")]
    NotAnObject {
        /// Selected format.
        format: InputFormat,
    },
}

/// Decodes caller input into a JSON argument map.
///
/// # Errors
///
/// Returns [`InputError`] when the bytes are not utf-8, do not parse, or do
/// not hold a mapping.
pub fn parse_input(bytes: &[u8], format: InputFormat) -> Result<Map<String, Value>, InputError> {
    let text = std::str::from_utf8(bytes).map_err(|_| InputError::Utf8)?;
    let parse_error = |message: String| InputError::Parse {
        format,
        message,
    };
    let value: Value = match format {
        InputFormat::Json => {
            serde_json::from_str(text).map_err(|err| parse_error(err.to_string()))?
        }
        InputFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|err| parse_error(err.to_string()))?
        }
        InputFormat::Toml => toml::from_str(text).map_err(|err| parse_error(err.to_string()))?,
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(InputError::NotAnObject {
            format,
        }),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "Unit tests use expect for setup clarity.")]

    use std::path::Path;

    use serde_json::json;

    use super::InputError;
    use super::InputFormat;
    use super::parse_input;

    #[test]
    fn format_inferred_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("args.json")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("args.YML")), Some(InputFormat::Yaml));
        assert_eq!(InputFormat::from_path(Path::new("args.toml")), Some(InputFormat::Toml));
        assert_eq!(InputFormat::from_path(Path::new("args.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("args")), None);
    }

    #[test]
    fn formats_decode_to_the_same_map() {
        let json = parse_input(br#"{"path": "C:\\a.xml", "backup": true}"#, InputFormat::Json)
            .expect("json");
        let yaml = parse_input(b"path: 'C:\\a.xml'\nbackup: true\n", InputFormat::Yaml)
            .expect("yaml");
        let toml = parse_input(b"path = 'C:\\a.xml'\nbackup = true\n", InputFormat::Toml)
            .expect("toml");
        let expected = json!({"path": "C:\\a.xml", "backup": true});
        assert_eq!(serde_json::Value::Object(json), expected);
        assert_eq!(serde_json::Value::Object(yaml), expected);
        assert_eq!(serde_json::Value::Object(toml), expected);
    }

    #[test]
    fn non_mapping_input_rejected() {
        assert_eq!(
            parse_input(b"[1, 2]", InputFormat::Json),
            Err(InputError::NotAnObject {
                format: InputFormat::Json
            })
        );
        assert_eq!(
            parse_input(b"- a\n- b\n", InputFormat::Yaml),
            Err(InputError::NotAnObject {
                format: InputFormat::Yaml
            })
        );
    }

    #[test]
    fn malformed_and_non_utf8_input_rejected() {
        assert!(matches!(
            parse_input(b"{", InputFormat::Json),
            Err(InputError::Parse {
                format: InputFormat::Json,
                ..
            })
        ));
        assert_eq!(parse_input(&[0xFF, 0xFE], InputFormat::Json), Err(InputError::Utf8));
    }
}
