//! Pipeline entry point.
//!
//! Wires the stages together from `aurn.toml`: load the persisted site
//! table (or build it by scraping the directory), select sites within the
//! configured radius, download their monitoring data for the configured
//! year, and publish the output directory when the storage settings ask
//! for it.

use std::error::Error;
use std::path::Path;

use aurn_scraper::config;
use aurn_scraper::directory;
use aurn_scraper::distance;
use aurn_scraper::download;
use aurn_scraper::fetch::HttpFetcher;
use aurn_scraper::logging::{self, DataSource, LogLevel};
use aurn_scraper::storage;
use aurn_scraper::table;

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    logging::init_logger(LogLevel::Info, Some("aurn_scraper.log"));

    let settings = config::load_settings("aurn.toml")?;
    let index = config::load_site_index(&settings.scraper.site_index)?;
    let fetcher = HttpFetcher::new()?;

    // Build-or-load: the directory scrape is the slow part, so reuse the
    // persisted table when it exists.
    let table_path = Path::new(&settings.scraper.site_table);
    let sites = if table_path.exists() {
        logging::info(
            DataSource::System,
            None,
            &format!("loading site table from {}", settings.scraper.site_table),
        );
        table::load_site_table(table_path)?
    } else {
        let sites = directory::all_sites_info(&fetcher, &index, &settings.scraper.base_url)?;
        table::save_site_table(table_path, &sites)?;
        sites
    };

    let query = &settings.query;
    let nearby = distance::find_sites_by_distance(&sites, query.x, query.y, query.distance_m);
    logging::info(
        DataSource::System,
        None,
        &format!(
            "{} of {} sites within {:.1} km of ({}, {})",
            nearby.len(),
            sites.len(),
            query.distance_m / 1000.0,
            query.x,
            query.y
        ),
    );

    let report = download::download_monitoring_data(
        &fetcher,
        &nearby,
        query.year,
        &settings.scraper.base_url,
        &settings.scraper.monitoring_dir,
    )?;
    if !report.failed.is_empty() {
        logging::warn(
            DataSource::System,
            None,
            &format!("sites without data for {}: {}", query.year, report.failed.join(", ")),
        );
    }

    if settings.storage.upload {
        storage::upload_directory_to_s3(&settings.scraper.monitoring_dir, &settings.storage)?;
    }

    Ok(())
}
