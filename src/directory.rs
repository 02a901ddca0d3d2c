//! Site directory builder.
//!
//! Resolves AURN directory entries to [`SiteRecord`]s. Each site has an
//! info page whose `#tab_info` block lists the metadata as labelled
//! paragraphs ("Environment Type: ...", "Easting/Northing: X, Y",
//! "Site Address: ..."). Extraction reads only rendered page content
//! supplied by the injected fetcher; a missing block or malformed field is
//! a [`ScrapeError::PageStructure`] and aborts immediately. A name with no
//! index entry is not an error, the lookup just comes back empty.
//!
//! Site photographs referenced by the page carousel can be downloaded
//! alongside a single-site lookup; images already on disk are not
//! replaced.

use std::error::Error;
use std::fs;
use std::path::Path;

use scraper::{Html, Selector};

use crate::config::SiteIndexEntry;
use crate::fetch::PageFetcher;
use crate::logging::{self, DataSource};
use crate::model::{ScrapeError, SiteRecord, SiteTable};

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Resolves a single site by its directory name.
///
/// Returns `Ok(None)` if the name has no entry in the site index. Fetch or
/// extraction failures for a known site are returned as errors.
pub fn single_site_info(
    fetcher: &dyn PageFetcher,
    index: &[SiteIndexEntry],
    base_url: &str,
    site_name: &str,
) -> Result<Option<SiteRecord>, ScrapeError> {
    let entry = match index.iter().find(|e| e.site_name == site_name) {
        Some(entry) => entry,
        None => {
            logging::warn(
                DataSource::Directory,
                None,
                &format!("'{}' is not in the site index", site_name),
            );
            return Ok(None);
        }
    };
    let link = entry.info_link(base_url);
    let html = fetcher.fetch_page(&link)?;
    extract_site_record(&html, entry, &link).map(Some)
}

/// Resolves every entry in the site index to a [`SiteRecord`].
///
/// Entries are visited in index order and the returned table preserves
/// that order. Any fetch or extraction failure aborts the enumeration;
/// a partially built directory is worse than a clean failure here, since
/// the persisted table is treated as the complete network.
pub fn all_sites_info(
    fetcher: &dyn PageFetcher,
    index: &[SiteIndexEntry],
    base_url: &str,
) -> Result<SiteTable, ScrapeError> {
    let mut table = Vec::with_capacity(index.len());
    for entry in index {
        let link = entry.info_link(base_url);
        let html = fetcher.fetch_page(&link)?;
        let record = extract_site_record(&html, entry, &link)?;
        logging::debug(
            DataSource::Directory,
            Some(&record.site_id),
            &format!("resolved '{}'", record.site_name),
        );
        table.push(record);
    }
    logging::info(
        DataSource::Directory,
        None,
        &format!("site directory built: {} records", table.len()),
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extracts a site record from a rendered site-info page.
fn extract_site_record(
    html: &str,
    entry: &SiteIndexEntry,
    link: &str,
) -> Result<SiteRecord, ScrapeError> {
    let document = Html::parse_document(html);
    let info_block = Selector::parse("#tab_info").unwrap();
    let paragraph = Selector::parse("p").unwrap();

    let tab_info = document.select(&info_block).next().ok_or_else(|| {
        ScrapeError::PageStructure(format!("info block (#tab_info) not found for {}", entry.uka_id))
    })?;

    let mut environment_type = None;
    let mut coordinates = None;
    let mut address = None;

    for p in tab_info.select(&paragraph) {
        let text = p.text().collect::<String>();
        let text = text.trim();
        if let Some(value) = labelled_value(text, "Environment Type") {
            environment_type = Some(value.to_string());
        } else if let Some(value) = labelled_value(text, "Easting/Northing") {
            coordinates = Some(parse_coordinates(value, &entry.uka_id)?);
        } else if let Some(value) = labelled_value(text, "Site Address") {
            address = Some(value.to_string());
        }
    }

    let environment_type = environment_type.ok_or_else(|| {
        ScrapeError::PageStructure(format!("environment type missing for {}", entry.uka_id))
    })?;
    let (x_coordinate, y_coordinate) = coordinates.ok_or_else(|| {
        ScrapeError::PageStructure(format!("easting/northing missing for {}", entry.uka_id))
    })?;

    Ok(SiteRecord {
        site_id: entry.uka_id.clone(),
        site_name: entry.site_name.clone(),
        x_coordinate,
        y_coordinate,
        environment_type,
        address,
        web_link: link.to_string(),
    })
}

/// Returns the value of a "Label: value" paragraph, or `None` if the text
/// does not carry that label.
fn labelled_value<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let (head, value) = text.split_once(": ")?;
    if head.trim() == label { Some(value.trim()) } else { None }
}

/// Parses "easting, northing" into planar coordinates.
///
/// Every downstream consumer assumes numeric projected values, so anything
/// else means the page layout changed.
fn parse_coordinates(value: &str, site_id: &str) -> Result<(f64, f64), ScrapeError> {
    let malformed = || {
        ScrapeError::PageStructure(format!(
            "easting/northing '{}' is not a coordinate pair for {}",
            value, site_id
        ))
    };
    let (x, y) = value.split_once(", ").ok_or_else(malformed)?;
    let x = x.trim().parse::<f64>().map_err(|_| malformed())?;
    let y = y.trim().parse::<f64>().map_err(|_| malformed())?;
    Ok((x, y))
}

// ---------------------------------------------------------------------------
// Site photographs
// ---------------------------------------------------------------------------

/// Returns the image URLs referenced by the site photo carousel, in page
/// order. A page without a carousel yields an empty list.
pub fn extract_image_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let carousel_images = Selector::parse("div.carousel-inner .item img").unwrap();
    document
        .select(&carousel_images)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect()
}

/// Downloads a site's carousel photographs into `image_dir` as
/// `{site_name}{n}.jpg`. Existing files are left in place. Per-image fetch
/// failures are logged and skipped. Returns the number of images written.
pub fn download_site_images(
    fetcher: &dyn PageFetcher,
    html: &str,
    site_name: &str,
    image_dir: impl AsRef<Path>,
) -> Result<usize, Box<dyn Error>> {
    let image_dir = image_dir.as_ref();
    let urls = extract_image_urls(html);
    if urls.is_empty() {
        return Ok(0);
    }
    fs::create_dir_all(image_dir)?;

    let mut downloaded = 0;
    for (n, url) in urls.iter().enumerate() {
        let filename = format!("{}{}.jpg", site_name, n);
        let target = image_dir.join(&filename);
        if target.exists() {
            logging::info(
                DataSource::Directory,
                None,
                &format!("{} already exists, image not replaced", filename),
            );
            continue;
        }
        match fetcher.fetch_binary(url) {
            Ok(bytes) => {
                fs::write(&target, bytes)?;
                downloaded += 1;
            }
            Err(e) => {
                logging::warn(
                    DataSource::Directory,
                    None,
                    &format!("image fetch failed for {}: {}", filename, e),
                );
            }
        }
    }
    Ok(downloaded)
}

/// Names (without extension) of the images already downloaded for a site,
/// following the `{site_name}{n}.jpg` numbering from zero.
pub fn existing_site_images(image_dir: impl AsRef<Path>, site_name: &str) -> Vec<String> {
    let image_dir = image_dir.as_ref();
    let mut names = Vec::new();
    for n in 0.. {
        let stem = format!("{}{}", site_name, n);
        if image_dir.join(format!("{}.jpg", stem)).exists() {
            names.push(stem);
        } else {
            break;
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
