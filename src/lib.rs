pub mod blueprint;
pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod fetch;
pub mod importer;
pub mod logging;
pub mod source;
pub mod store;
pub mod validation;
pub mod yaml;

pub use blueprint::Blueprint;
pub use error::{ImportError, Result};
pub use importer::{fetch_blueprint_from_url, resolve, ResolvedUrl};
pub use source::{ImportedBlueprint, SourceKind};
