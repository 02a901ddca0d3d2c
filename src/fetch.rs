//! Page retrieval seam.
//!
//! Extraction logic never talks to the network directly. It receives a
//! [`PageFetcher`], which supplies rendered page content (and raw bytes for
//! data files and images) for a URL. Production code uses [`HttpFetcher`];
//! tests substitute an in-memory fixture implementation. Swapping in a
//! browser-automation driver only requires another impl of this trait.

use std::time::Duration;

use crate::model::ScrapeError;

/// Supplies rendered page content for a URL.
pub trait PageFetcher {
    /// Fetches a page and returns its rendered HTML.
    fn fetch_page(&self, url: &str) -> Result<String, ScrapeError>;

    /// Fetches a binary resource (CSV data file, image) as raw bytes.
    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, ScrapeError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Fetcher backed by a blocking HTTP client.
///
/// The AURN site-info pages render their info block server-side, so plain
/// HTTP is sufficient for extraction.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;
        Ok(HttpFetcher { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ScrapeError::HttpError(response.status().as_u16()));
        }
        Ok(response)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        self.get(url)?
            .text()
            .map_err(|e| ScrapeError::Transport(e.to_string()))
    }

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let bytes = self
            .get(url)?
            .bytes()
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
