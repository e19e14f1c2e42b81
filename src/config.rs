//! Importer configuration
//!
//! Loaded from `<config dir>/blueprint-import/config.toml` unless a path is
//! given explicitly. Every field has a default, so an absent default file is
//! not an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_DOWNLOAD_BYTES, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Environment variable overriding `blueprints_dir`.
pub const BLUEPRINTS_DIR_ENV: &str = "BLUEPRINT_IMPORT_DIR";

const APP_DIR: &str = "blueprint-import";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImporterConfig {
    /// Root directory blueprints are saved under, one subdirectory per domain.
    pub blueprints_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_download_bytes: u64,
    pub user_agent: String,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            blueprints_dir: default_blueprints_dir(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_download_bytes: DEFAULT_MAX_DOWNLOAD_BYTES,
            user_agent: format!("{APP_DIR}/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ImporterConfig {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is used if present. The `BLUEPRINT_IMPORT_DIR` environment
    /// variable wins over the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        if let Ok(dir) = env::var(BLUEPRINTS_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.blueprints_dir = PathBuf::from(dir);
            }
        }

        config.blueprints_dir = expand_path(&config.blueprints_dir);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        if config.max_download_bytes == 0 {
            anyhow::bail!("max_download_bytes must be greater than 0");
        }
        Ok(config)
    }
}

/// `<config dir>/blueprint-import/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn default_blueprints_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("blueprints"))
        .unwrap_or_else(|| PathBuf::from("blueprints"))
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(expand_env_vars(&expand_tilde(s))),
        None => path.to_path_buf(),
    }
}

/// Expand ~ to home directory in paths
pub fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// Expand ${ENV_VAR} and $ENV_VAR patterns in strings. Unknown variables are left as-is.
pub fn expand_env_vars(s: &str) -> String {
    let re = match regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
    {
        Ok(re) => re,
        Err(_) => return s.to_string(),
    };

    re.replace_all(s, |caps: &regex::Captures| {
        let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
        match name.and_then(|name| env::var(name).ok()) {
            Some(value) => value,
            None => caps[0].to_string(),
        }
    })
    .to_string()
}
