//! Installer script downloads with optional SHA-256 pinning.
use std::time::Duration;

use anyhow::Result;

use crate::resources::error::ResourceError;

/// Overall timeout for a single script download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Source of installer scripts.
pub trait Downloader: Send + Sync + std::fmt::Debug {
    /// Fetch `url` and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Download`] if the request fails or the server
    /// answers with an error status.
    fn fetch(&self, url: &str) -> Result<String>;

    /// Fetch `url` and, when `sha256` is set, verify the body against it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or [`ResourceError::ChecksumMismatch`] if the
    /// body does not match the pin.
    fn fetch_verified(&self, url: &str, sha256: Option<&str>) -> Result<String> {
        let body = self.fetch(url)?;
        if let Some(expected) = sha256 {
            verify_sha256(url, body.as_bytes(), expected)?;
        }
        Ok(body)
    }
}

/// [`Downloader`] backed by a blocking `ureq` agent.
#[derive(Debug)]
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    /// Downloader with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<String> {
        let download_err = |e: ureq::Error| ResourceError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let mut response = self.agent.get(url).call().map_err(download_err)?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(download_err)?;
        Ok(body)
    }
}

/// Compute the lowercase hex SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest as _, Sha256};
    use std::fmt::Write as _;

    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(64);
    for b in &digest {
        // write! to a String is infallible.
        write!(hex, "{b:02x}").unwrap_or(());
    }
    hex
}

/// Check `bytes` against an expected hex digest (case-insensitive).
///
/// # Errors
///
/// Returns [`ResourceError::ChecksumMismatch`] when the digests differ.
pub fn verify_sha256(url: &str, bytes: &[u8], expected: &str) -> Result<(), ResourceError> {
    let actual = sha256_hex(bytes);
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(ResourceError::ChecksumMismatch {
            url: url.to_string(),
            expected: expected.trim().to_lowercase(),
            actual,
        })
    }
}
