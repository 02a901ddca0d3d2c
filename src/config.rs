//! Configuration loading.
//!
//! Two inputs are read at startup:
//!
//! - the site index, a JSON file grouping AURN sites by region. Each entry
//!   carries the site name and its UKA identifier, from which the site-info
//!   URL is built. This is the directory the scraper navigates; without it
//!   no site can be resolved.
//! - `aurn.toml`, the service settings: base URL, output directories,
//!   storage bucket, and the query (reference coordinates, radius, year)
//!   the pipeline binary runs with.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Path of the site-info page relative to the base URL. The UKA identifier
/// is appended as a query parameter.
const SITE_INFO_PATH: &str = "/networks/site-info?uka_id=";

// ---------------------------------------------------------------------------
// Site index (JSON)
// ---------------------------------------------------------------------------

/// One entry of the site index: a directory listing for a single station.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteIndexEntry {
    pub site_name: String,
    pub uka_id: String,
}

impl SiteIndexEntry {
    /// URL of this site's info page.
    pub fn info_link(&self, base_url: &str) -> String {
        format!("{}{}{}", base_url, SITE_INFO_PATH, self.uka_id)
    }
}

/// Loads the site index from a JSON file.
///
/// The file is an object whose keys are region names and whose values are
/// arrays of site entries. Regions are flattened into a single list, in
/// key order, preserving each region's entry order. Unknown fields on an
/// entry are ignored so the index file can carry extra metadata.
pub fn load_site_index(path: impl AsRef<Path>) -> Result<Vec<SiteIndexEntry>, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    parse_site_index(&contents)
}

fn parse_site_index(contents: &str) -> Result<Vec<SiteIndexEntry>, Box<dyn Error>> {
    let regions: BTreeMap<String, Vec<SiteIndexEntry>> = serde_json::from_str(contents)?;
    Ok(regions.into_values().flatten().collect())
}

// ---------------------------------------------------------------------------
// Service settings (TOML)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
    pub query: QuerySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// Root of the AURN site, e.g. "https://uk-air.defra.gov.uk".
    pub base_url: String,
    /// Path of the site index JSON file.
    pub site_index: String,
    /// Path the persisted site table is written to and read from.
    pub site_table: String,
    /// Directory monitoring CSVs are downloaded into.
    pub monitoring_dir: String,
    /// Directory site photographs are downloaded into.
    pub image_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub bucket: String,
    pub region: String,
    /// Whether the pipeline binary publishes the monitoring directory
    /// after downloading. Defaults to off; uploads can always be run
    /// separately.
    #[serde(default)]
    pub upload: bool,
}

/// The query the pipeline binary runs: sites within `distance_m` metres of
/// (x, y), monitoring data for `year`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    pub x: f64,
    pub y: f64,
    pub distance_m: f64,
    pub year: i32,
}

/// Loads service settings from a TOML file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&contents)?;
    Ok(settings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_INDEX: &str = r#"
    {
        "wales": [
            {"site_name": "Port Talbot Margam", "uka_id": "UKA00492", "site_status": "open"},
            {"site_name": "Cardiff Centre", "uka_id": "UKA00487"}
        ],
        "yorkshire": [
            {"site_name": "Sheffield Barnsley Road", "uka_id": "UKA00575"}
        ]
    }"#;

    #[test]
    fn test_site_index_is_flattened_across_regions() {
        let index = parse_site_index(SAMPLE_INDEX).expect("sample index should parse");
        assert_eq!(index.len(), 3);
        let names: Vec<_> = index.iter().map(|e| e.site_name.as_str()).collect();
        assert!(names.contains(&"Port Talbot Margam"));
        assert!(names.contains(&"Sheffield Barnsley Road"));
    }

    #[test]
    fn test_site_index_preserves_entry_order_within_region() {
        let index = parse_site_index(SAMPLE_INDEX).expect("sample index should parse");
        // BTreeMap iterates regions in key order: wales before yorkshire.
        assert_eq!(index[0].site_name, "Port Talbot Margam");
        assert_eq!(index[1].site_name, "Cardiff Centre");
        assert_eq!(index[2].site_name, "Sheffield Barnsley Road");
    }

    #[test]
    fn test_extra_entry_fields_are_ignored() {
        // The first entry carries "site_status"; parsing must not reject it.
        let index = parse_site_index(SAMPLE_INDEX).expect("extra fields should be ignored");
        assert_eq!(index[0].uka_id, "UKA00492");
    }

    #[test]
    fn test_info_link_appends_uka_id_to_base() {
        let entry = SiteIndexEntry {
            site_name: "Port Talbot Margam".to_string(),
            uka_id: "UKA00492".to_string(),
        };
        assert_eq!(
            entry.info_link("https://uk-air.defra.gov.uk"),
            "https://uk-air.defra.gov.uk/networks/site-info?uka_id=UKA00492"
        );
    }

    #[test]
    fn test_malformed_index_returns_error() {
        assert!(parse_site_index("not json").is_err());
        // An entry missing uka_id is a config error, not something to guess at.
        assert!(parse_site_index(r#"{"wales": [{"site_name": "X"}]}"#).is_err());
    }

    #[test]
    fn test_settings_parse_from_toml() {
        let toml_src = r#"
            [scraper]
            base_url = "https://uk-air.defra.gov.uk"
            site_index = "aurn_sites.json"
            site_table = "all_sites.csv"
            monitoring_dir = "monitoring_files"
            image_dir = "image_files"

            [storage]
            bucket = "aurn-monitoring-data"
            region = "eu-west-2"

            [query]
            x = 436276.0
            y = 389930.0
            distance_m = 10000.0
            year = 2019
        "#;
        let settings: Settings = toml::from_str(toml_src).expect("settings should parse");
        assert_eq!(settings.scraper.monitoring_dir, "monitoring_files");
        assert_eq!(settings.storage.region, "eu-west-2");
        assert!(!settings.storage.upload, "upload defaults to off");
        assert_eq!(settings.query.year, 2019);
        assert_eq!(settings.query.distance_m, 10000.0);
    }
}
