//! Blueprint files hosted on GitHub.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;

use crate::blueprint::Blueprint;
use crate::error::{ImportError, Result};
use crate::fetch::Fetch;
use crate::yaml::parse_yaml;

use super::ImportedBlueprint;

const RAW_PREFIX: &str = "https://raw.githubusercontent.com/";

static FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/(?P<repository>.+)/blob/(?P<path>.+)$")
        .expect("Invalid GitHub file regex pattern")
});

/// Rewrite a GitHub file URL to its raw content URL. Raw URLs pass through.
pub fn import_url(url: &str) -> Result<String> {
    if url.starts_with(RAW_PREFIX) {
        return Ok(url.to_string());
    }

    let caps = FILE_PATTERN
        .captures(url)
        .ok_or_else(|| ImportError::UnsupportedUrl(url.to_string()))?;

    Ok(format!("{RAW_PREFIX}{}/{}", &caps["repository"], &caps["path"]))
}

/// `<owner>/<file name>` from a raw URL, without the `.yaml` extension.
pub fn suggested_filename(import_url: &str) -> Result<String> {
    let parsed = url::Url::parse(import_url)
        .map_err(|e| ImportError::invalid_response(import_url, format!("invalid url: {e}")))?;

    let segments: Vec<String> = parsed
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    let (Some(owner), Some(file)) = (segments.first(), segments.last()) else {
        return Err(ImportError::invalid_response(
            import_url,
            "url has no file path",
        ));
    };

    let name = file.strip_suffix(".yaml").unwrap_or(file.as_str());
    Ok(format!("{owner}/{name}"))
}

/// Fetch a raw blueprint file.
pub fn fetch(fetcher: &dyn Fetch, url: &str) -> Result<ImportedBlueprint> {
    let raw_url = import_url(url)?;
    tracing::debug!(url, raw_url = %raw_url, "importing from GitHub file");

    let raw_yaml = fetcher.get_text(&raw_url)?;
    extract_blueprint(&raw_url, raw_yaml)
}

/// Parse a downloaded file as a blueprint.
pub fn extract_blueprint(import_url: &str, raw_yaml: String) -> Result<ImportedBlueprint> {
    let data = parse_yaml(&raw_yaml)?;
    let blueprint = Blueprint::new(data, None)?;

    Ok(ImportedBlueprint {
        suggested_filename: suggested_filename(import_url)?,
        raw_data: raw_yaml,
        blueprint,
    })
}
