//! Blueprint schema type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a blueprint document, limited to the parts we inspect.
///
/// Everything outside the `blueprint:` section (triggers, actions, ...) is
/// kept as raw YAML on [`super::Blueprint`].
#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintDocument {
    pub blueprint: BlueprintMetadata,
}

/// The `blueprint:` section of a blueprint document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintMetadata {
    pub name: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeassistant: Option<PlatformRequirements>,
    /// Declared inputs. A bare key (`trigger_event:`) declares an input with
    /// no further settings.
    #[serde(default, rename = "input", skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, Option<InputDefinition>>,
}

/// Platform version requirements declared by a blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRequirements {
    #[serde(default)]
    pub min_version: Option<String>,
}

/// Settings of a single blueprint input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<serde_yaml::Value>,
}

/// Validation error with context
#[derive(Debug)]
pub struct ValidationError {
    pub message: String,
    pub field: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{}: {}", field, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}
