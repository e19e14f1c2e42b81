//! Blueprint schema validation

use semver::Version;

use crate::validation::validate_domain;

use super::types::{BlueprintMetadata, ValidationError};

/// Validate the `blueprint:` section of a document.
///
/// When `expected_domain` is given the declared domain has to match it.
pub fn validate(
    metadata: &BlueprintMetadata,
    expected_domain: Option<&str>,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if metadata.name.trim().is_empty() {
        errors.push(ValidationError {
            message: "cannot be empty".to_string(),
            field: Some("name".to_string()),
        });
    }

    if let Err(e) = validate_domain(&metadata.domain) {
        errors.push(ValidationError {
            message: e.to_string(),
            field: Some("domain".to_string()),
        });
    } else if let Some(expected) = expected_domain {
        if metadata.domain != expected {
            errors.push(ValidationError {
                message: format!(
                    "Found incorrect blueprint type {}, expected {}",
                    metadata.domain, expected
                ),
                field: Some("domain".to_string()),
            });
        }
    }

    if let Some(source_url) = &metadata.source_url {
        if let Err(message) = validate_source_url(source_url) {
            errors.push(ValidationError {
                message,
                field: Some("source_url".to_string()),
            });
        }
    }

    if let Some(min_version) = metadata
        .homeassistant
        .as_ref()
        .and_then(|req| req.min_version.as_deref())
    {
        if let Err(e) = Version::parse(min_version) {
            errors.push(ValidationError {
                message: format!("'{min_version}' is not a valid version: {e}"),
                field: Some("homeassistant.min_version".to_string()),
            });
        }
    }

    for key in metadata.inputs.keys() {
        if key.trim().is_empty() {
            errors.push(ValidationError {
                message: "input names cannot be empty".to_string(),
                field: Some("input".to_string()),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_source_url(source_url: &str) -> Result<(), String> {
    let parsed = url::Url::parse(source_url).map_err(|e| format!("invalid url: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("unsupported url scheme '{scheme}'")),
    }
}
