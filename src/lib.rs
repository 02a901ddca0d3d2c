//! AURN air-quality site scraper.
//!
//! Builds a directory of UK AURN monitoring stations from the DEFRA
//! UK-AIR site, selects stations by planar distance from a reference
//! point, downloads per-station yearly monitoring CSVs, and can publish
//! the output directory to S3.
//!
//! The pipeline is sequential and blocking throughout. Page rendering is
//! behind the [`fetch::PageFetcher`] seam, so extraction logic is testable
//! offline and independent of the automation tool that renders pages.

pub mod config;
pub mod db;
pub mod directory;
pub mod distance;
pub mod download;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod storage;
pub mod table;
