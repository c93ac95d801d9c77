/*!
input.rs - caller-supplied payloads and the input error category.

Input errors are detected before any request is made: a malformed JSON
argument, an unreadable or unparsable payload file, an empty tool name or
an unusable host. They are reported as plain text on stderr (exit 1).
*/

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Error parsing JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("failed to read payload file '{}': {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON payload file '{}': {source}", .path.display())]
    JsonFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse YAML payload file '{}': {source}", .path.display())]
    YamlFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("tool name cannot be empty")]
    EmptyToolName,

    #[error("invalid host '{host}': {source}")]
    InvalidHost {
        host: String,
        source: url::ParseError,
    },
}

/// Parse the optional trailing JSON argument. Absent or empty means `{}`.
pub fn parse_json_arg(raw: Option<&str>) -> Result<Value, InputError> {
    match raw {
        None | Some("") => Ok(empty_object()),
        Some(s) => serde_json::from_str(s)
            .map(or_empty)
            .map_err(InputError::Json),
    }
}

/// Load a payload from disk. `.yaml` / `.yml` are read as YAML, anything
/// else as JSON.
pub fn load_payload_file(path: &Path) -> Result<Value, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InputError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value = if is_yaml {
        serde_yaml::from_str::<Value>(&raw).map_err(|source| InputError::YamlFile {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str::<Value>(&raw).map_err(|source| InputError::JsonFile {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(or_empty(value))
}

pub fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// A literal `null` payload is posted as `{}`.
fn or_empty(value: Value) -> Value {
    if value.is_null() { empty_object() } else { value }
}
