//! Core data types for the AURN site scraper.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no I/O, only types and their error formatting.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Site records
// ---------------------------------------------------------------------------

/// One monitoring station's identity and metadata, as extracted from its
/// site-info page on the AURN directory.
///
/// Coordinates are OS National Grid eastings/northings in metres (planar
/// projected values, not lat/long), so distances between records are
/// Euclidean in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// DEFRA UKA identifier, e.g. "UKA00315". Uniquely identifies the site.
    pub site_id: String,
    /// Site name as listed in the directory, e.g. "Port Talbot Margam".
    pub site_name: String,
    /// OS National Grid easting, metres.
    pub x_coordinate: f64,
    /// OS National Grid northing, metres.
    pub y_coordinate: f64,
    /// Environment classification, e.g. "Urban Background".
    pub environment_type: String,
    /// Street address line from the info page. Not every site lists one.
    pub address: Option<String>,
    /// URL of the site-info page the record was extracted from.
    pub web_link: String,
}

/// The full ordered collection of site records for the network.
pub type SiteTable = Vec<SiteRecord>;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or extracting AURN directory data.
#[derive(Debug, PartialEq)]
pub enum ScrapeError {
    /// Non-2xx HTTP response for a page or data file.
    HttpError(u16),
    /// The request never produced a response (DNS, connect, timeout).
    Transport(String),
    /// The rendered page did not have the expected structure: the layout
    /// changed, or a required field was missing or malformed.
    PageStructure(String),
    /// The requested site name has no entry in the site index.
    SiteNotFound(String),
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::HttpError(code) => write!(f, "HTTP error: {}", code),
            ScrapeError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ScrapeError::PageStructure(msg) => write!(f, "Page structure mismatch: {}", msg),
            ScrapeError::SiteNotFound(name) => write!(f, "Site not found: {}", name),
        }
    }
}

impl std::error::Error for ScrapeError {}
