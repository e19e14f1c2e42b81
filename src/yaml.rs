//! YAML parsing that keeps custom tags such as `!input name` intact.

use serde_yaml::Value;

use crate::error::{ImportError, Result};

/// Parse a YAML document into a generic value.
///
/// Tagged scalars (`!input trigger_event`) come back as `Value::Tagged`, so a
/// blueprint can be written out again without losing its input references.
pub fn parse_yaml(content: &str) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| ImportError::InvalidYaml(e.to_string()))
}

/// Serialize a YAML value back to text.
pub fn dump_yaml(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| ImportError::InvalidYaml(e.to_string()))
}
