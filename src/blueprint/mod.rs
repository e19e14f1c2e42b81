//! Blueprint documents: schema, validation and metadata updates

mod types;
mod validation;

use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::error::{ImportError, Result};
use crate::yaml::dump_yaml;

pub use types::{
    BlueprintDocument, BlueprintMetadata, InputDefinition, PlatformRequirements, ValidationError,
};
pub use validation::validate;

/// Key of the metadata section in a blueprint document.
pub const BLUEPRINT_KEY: &str = "blueprint";

/// Returns true if the value looks like a blueprint: a mapping with a
/// `blueprint` section. Schema checks happen in [`Blueprint::new`].
pub fn is_blueprint_config(value: &Value) -> bool {
    value
        .as_mapping()
        .is_some_and(|mapping| mapping.contains_key(BLUEPRINT_KEY))
}

/// A validated blueprint document.
#[derive(Debug, Clone)]
pub struct Blueprint {
    data: Value,
    metadata: BlueprintMetadata,
}

impl Blueprint {
    /// Validate a parsed document and wrap it.
    pub fn new(data: Value, expected_domain: Option<&str>) -> Result<Self> {
        if !is_blueprint_config(&data) {
            return Err(ImportError::invalid_blueprint(
                "document has no 'blueprint' section",
            ));
        }

        let document: BlueprintDocument = serde_yaml::from_value(data.clone())
            .map_err(|e| ImportError::invalid_blueprint(e.to_string()))?;

        if let Err(errors) = validate(&document.blueprint, expected_domain) {
            let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ImportError::invalid_blueprint(messages.join("; ")));
        }

        Ok(Self {
            data,
            metadata: document.blueprint,
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn domain(&self) -> &str {
        &self.metadata.domain
    }

    pub fn metadata(&self) -> &BlueprintMetadata {
        &self.metadata
    }

    pub fn inputs(&self) -> &BTreeMap<String, Option<InputDefinition>> {
        &self.metadata.inputs
    }

    pub fn source_url(&self) -> Option<&str> {
        self.metadata.source_url.as_deref()
    }

    /// The full document, including triggers and actions.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Record where the blueprint was imported from.
    pub fn update_metadata(&mut self, source_url: &str) {
        if let Some(section) = self
            .data
            .get_mut(BLUEPRINT_KEY)
            .and_then(Value::as_mapping_mut)
        {
            section.insert(
                Value::String("source_url".to_string()),
                Value::String(source_url.to_string()),
            );
        }
        self.metadata.source_url = Some(source_url.to_string());
    }

    pub fn to_yaml(&self) -> Result<String> {
        dump_yaml(&self.data)
    }
}
