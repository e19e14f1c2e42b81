//! Blueprint sources: forum topics, GitHub files and GitHub gists.
//!
//! Each source recognizes its own URL shape, rewrites it to something
//! fetchable and knows how to dig the YAML document out of the response.

pub mod community;
pub mod gist;
pub mod github;

use std::fmt;

use crate::blueprint::Blueprint;
use crate::error::Result;
use crate::fetch::Fetch;

/// A blueprint fetched from a source, before it is saved.
#[derive(Debug, Clone)]
pub struct ImportedBlueprint {
    /// `<namespace>/<name>`, without extension.
    pub suggested_filename: String,
    /// The YAML text exactly as found in the source.
    pub raw_data: String,
    pub blueprint: Blueprint,
}

/// The kinds of URL the importer understands, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    CommunityPost,
    GithubFile,
    GithubGist,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [
        SourceKind::CommunityPost,
        SourceKind::GithubFile,
        SourceKind::GithubGist,
    ];

    /// The URL that would be fetched for `url`, or `UnsupportedUrl`.
    pub fn fetch_url(self, url: &str) -> Result<String> {
        match self {
            SourceKind::CommunityPost => community::import_url(url),
            SourceKind::GithubFile => github::import_url(url),
            SourceKind::GithubGist => gist::gist_id(url).map(gist::api_url),
        }
    }

    /// Fetch and extract a blueprint from `url`.
    pub fn fetch(self, fetcher: &dyn Fetch, url: &str) -> Result<ImportedBlueprint> {
        match self {
            SourceKind::CommunityPost => community::fetch(fetcher, url),
            SourceKind::GithubFile => github::fetch(fetcher, url),
            SourceKind::GithubGist => gist::fetch(fetcher, url),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::CommunityPost => write!(f, "community post"),
            SourceKind::GithubFile => write!(f, "GitHub file"),
            SourceKind::GithubGist => write!(f, "GitHub gist"),
        }
    }
}
