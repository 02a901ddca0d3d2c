//! Monitoring data downloader.
//!
//! AURN publishes pre-formatted hourly data as one CSV per station per
//! year, at a URL derived from the UKA identifier. Downloads run
//! sequentially; a failed site is recorded in the report and the batch
//! continues. Files already on disk are not replaced.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::fetch::PageFetcher;
use crate::logging::{self, DataSource};
use crate::model::SiteRecord;

/// Outcome of a bulk download: how many files were written and which sites
/// could not be retrieved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownloadReport {
    pub successful: usize,
    pub failed: Vec<String>,
}

/// URL of the pre-formatted hourly data file for one station and year.
pub fn build_monitoring_url(base_url: &str, site_id: &str, year: i32) -> String {
    format!("{}/data_files/site_data/{}_{}.csv", base_url, site_id, year)
}

/// Local file name for one station's yearly data.
pub fn monitoring_filename(site_id: &str, year: i32) -> String {
    format!("{}_{}.csv", site_id, year)
}

/// Downloads the yearly monitoring CSV for each site into `out_dir`
/// (created if missing).
///
/// Per-site failures (missing resource, network error) are logged and the
/// site is added to the report's failed list; remaining sites are still
/// processed. An empty site list writes nothing and is not an error.
pub fn download_monitoring_data(
    fetcher: &dyn PageFetcher,
    sites: &[SiteRecord],
    year: i32,
    base_url: &str,
    out_dir: impl AsRef<Path>,
) -> Result<DownloadReport, Box<dyn Error>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut report = DownloadReport::default();
    for site in sites {
        let filename = monitoring_filename(&site.site_id, year);
        let target = out_dir.join(&filename);
        if target.exists() {
            logging::info(
                DataSource::Download,
                Some(&site.site_id),
                &format!("{} already exists, file not replaced", filename),
            );
            continue;
        }

        let url = build_monitoring_url(base_url, &site.site_id, year);
        match fetcher.fetch_binary(&url) {
            Ok(bytes) => {
                fs::write(&target, bytes)?;
                report.successful += 1;
            }
            Err(e) => {
                logging::log_download_failure(&site.site_id, "monitoring data fetch", &e);
                report.failed.push(site.site_name.clone());
            }
        }
    }

    logging::log_download_summary(sites.len(), report.successful, report.failed.len());
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
