//! Import entry point: pick the source for a URL and fetch the blueprint.

use crate::error::{ImportError, Result};
use crate::fetch::Fetch;
use crate::source::{ImportedBlueprint, SourceKind};

/// Where a URL would be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub kind: SourceKind,
    pub fetch_url: String,
}

/// Find the source that handles `url` without touching the network.
pub fn resolve(url: &str) -> Result<ResolvedUrl> {
    for kind in SourceKind::ALL {
        match kind.fetch_url(url) {
            Ok(fetch_url) => return Ok(ResolvedUrl { kind, fetch_url }),
            Err(e) if e.is_unsupported_url() => continue,
            Err(e) => return Err(e),
        }
    }
    Err(ImportError::UnsupportedUrl(url.to_string()))
}

/// Fetch a blueprint from a forum topic, GitHub file or gist URL.
///
/// Sources are tried in order; the first one that accepts the URL does the
/// fetch and its result (or error) is returned. The blueprint's `source_url`
/// is set to `url` as given, not to the rewritten fetch URL.
pub fn fetch_blueprint_from_url(fetcher: &dyn Fetch, url: &str) -> Result<ImportedBlueprint> {
    for kind in SourceKind::ALL {
        match kind.fetch(fetcher, url) {
            Ok(mut imported) => {
                imported.blueprint.update_metadata(url);
                tracing::info!(
                    source = %kind,
                    name = imported.blueprint.name(),
                    suggested_filename = %imported.suggested_filename,
                    "blueprint imported"
                );
                return Ok(imported);
            }
            Err(e) if e.is_unsupported_url() => continue,
            Err(e) => return Err(e),
        }
    }
    Err(ImportError::UnsupportedUrl(url.to_string()))
}
