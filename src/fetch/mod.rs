//! Fetching remote content.
//!
//! Sources only need "GET this URL as text", so the HTTP client sits behind a
//! small trait and tests swap in [`MockFetcher`].

mod client;
mod mock;

use crate::error::Result;

pub use client::{
    HttpFetcher, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_DOWNLOAD_BYTES,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use mock::MockFetcher;

/// Something that can download a URL as UTF-8 text.
pub trait Fetch {
    fn get_text(&self, url: &str) -> Result<String>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get_text(&self, url: &str) -> Result<String> {
        (**self).get_text(url)
    }
}
