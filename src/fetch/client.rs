//! Blocking HTTP client used to download blueprint sources.
//!
//! Requests have connect and total timeouts, and bodies are read with a size
//! limit so a hostile server cannot stream unbounded data.

use reqwest::blocking::{Client, Response};
use std::io::Read;
use std::time::Duration;

use crate::config::ImporterConfig;
use crate::error::{ImportError, Result};

use super::Fetch;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_DOWNLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// [`Fetch`] implementation backed by `reqwest`.
pub struct HttpFetcher {
    client: Client,
    max_bytes: u64,
}

impl HttpFetcher {
    pub fn new(config: &ImporterConfig) -> Result<Self> {
        let client = create_http_client(
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )?;
        Ok(Self {
            client,
            max_bytes: config.max_download_bytes,
        })
    }
}

impl Fetch for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ImportError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        validate_response_status(&response, url)?;
        download_text_with_limit(response, self.max_bytes, url)
    }
}

/// Create an HTTP client with timeout configuration.
/// - connect_timeout: Maximum time to establish a TCP connection
/// - timeout: Maximum time for the entire request (connection + data transfer)
pub(crate) fn create_http_client(
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: &str,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .user_agent(user_agent.to_string())
        .build()
        .map_err(|e| ImportError::Request {
            url: String::new(),
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// Turn a non-2xx status into [`ImportError::Http`].
pub(crate) fn validate_response_status(response: &Response, url: &str) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(ImportError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        });
    }
    Ok(())
}

/// Read a body with size limit enforcement.
/// Checks Content-Length header first, then enforces the limit while reading.
pub(crate) fn read_with_limit<R: Read>(
    mut reader: R,
    content_length: Option<u64>,
    max_size: u64,
    url: &str,
) -> Result<Vec<u8>> {
    let too_large = || ImportError::TooLarge {
        url: url.to_string(),
        max: max_size,
    };

    if content_length.is_some_and(|len| len > max_size) {
        return Err(too_large());
    }

    let mut bytes = Vec::new();
    let mut total_read: u64 = 0;
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buffer)
            .map_err(|e| ImportError::invalid_response(url, format!("failed to read body: {e}")))?;
        if n == 0 {
            break;
        }
        total_read += n as u64;
        if total_read > max_size {
            return Err(too_large());
        }
        bytes.extend_from_slice(&buffer[..n]);
    }

    Ok(bytes)
}

/// Download text content with size limit enforcement.
pub(crate) fn download_text_with_limit(
    response: Response,
    max_size: u64,
    url: &str,
) -> Result<String> {
    let content_length = response.content_length();
    let bytes = read_with_limit(response, content_length, max_size, url)?;
    decode_text(bytes, url)
}

pub(crate) fn decode_text(bytes: Vec<u8>, url: &str) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| ImportError::invalid_response(url, "response contains invalid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_create_http_client() {
        let client = create_http_client(
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            "blueprint-import-test",
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_read_within_limit() {
        let data = vec![b'a'; 1000];
        let bytes = read_with_limit(Cursor::new(data.clone()), None, 1000, "u").unwrap();
        assert_eq!(bytes, data);
    }

    #[test]
    fn test_read_rejects_large_content_length() {
        let result = read_with_limit(Cursor::new(Vec::new()), Some(2048), 1024, "u");
        assert!(matches!(result, Err(ImportError::TooLarge { max: 1024, .. })));
    }

    #[test]
    fn test_read_enforces_limit_while_streaming() {
        // Content-Length missing or lying, the stream itself is too long
        let data = vec![0u8; 20_000];
        let result = read_with_limit(Cursor::new(data), Some(10), 16_384, "u");
        assert!(matches!(result, Err(ImportError::TooLarge { .. })));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"name: Light".to_vec(), "u").unwrap(), "name: Light");

        let err = decode_text(vec![0xff, 0xfe], "https://a.test/x").unwrap_err();
        assert!(matches!(err, ImportError::InvalidResponse { ref url, .. } if url == "https://a.test/x"));
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_http_fetcher_from_default_config() {
        assert!(HttpFetcher::new(&ImporterConfig::default()).is_ok());
    }
}
