//! Error type shared by every stage of the import pipeline.

use std::path::PathBuf;

/// All errors that can occur while importing or storing a blueprint.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    /// The URL is not handled by a source. The importer moves on to the next one.
    #[error("Unsupported url: {0}")]
    UnsupportedUrl(String),

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to {url} failed: HTTP {status} - {reason}")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Response from {url} exceeds maximum allowed size of {max} bytes")]
    TooLarge { url: String, max: u64 },

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("No valid blueprint found in the {0}")]
    NoBlueprintFound(String),

    #[error("Blueprint already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid blueprint path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// True when the error only means "this source does not handle the URL".
    pub fn is_unsupported_url(&self) -> bool {
        matches!(self, ImportError::UnsupportedUrl(_))
    }

    pub(crate) fn invalid_blueprint(message: impl Into<String>) -> Self {
        ImportError::InvalidBlueprint(message.into())
    }

    pub(crate) fn invalid_response(url: &str, message: impl ToString) -> Self {
        ImportError::InvalidResponse {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
