//! Mock fetcher for testing
//!
//! Serves registered bodies by URL without touching the network and records
//! every request so tests can assert on the URLs that were fetched.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{ImportError, Result};

use super::Fetch;

enum MockResponse {
    Body(String),
    Status(u16),
}

/// In-memory [`Fetch`] implementation.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Body(body.into()));
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), MockResponse::Status(status));
        self
    }

    /// All URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Fetch for MockFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(ImportError::Http {
                url: url.to_string(),
                status: *status,
                reason: "Mock error".to_string(),
            }),
            None => Err(ImportError::Http {
                url: url.to_string(),
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}
