//! Site table persistence.
//!
//! The directory scrape is slow (one page per station), so the resulting
//! table is persisted between runs as CSV and reloaded by later pipeline
//! stages. The table is an explicit value passed between calls; nothing in
//! the crate reads the file behind the caller's back. Writing is
//! whole-file replace, no transactional guarantees.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::model::{SiteRecord, SiteTable};

/// Writes the site table to `path` as CSV, replacing any previous file.
pub fn save_site_table(path: impl AsRef<Path>, table: &[SiteRecord]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in table {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a site table previously written by [`save_site_table`].
pub fn load_site_table(path: impl AsRef<Path>) -> Result<SiteTable, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut table = Vec::new();
    for record in reader.deserialize() {
        table.push(record?);
    }
    Ok(table)
}

/// Exports each record as a pretty-printed JSON file named after the site,
/// under `dir` (created if missing). Returns the number of files written.
pub fn export_records_json(
    table: &[SiteRecord],
    dir: impl AsRef<Path>,
) -> Result<usize, Box<dyn Error>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for record in table {
        let path = dir.join(format!("{}.json", record.site_name));
        fs::write(path, serde_json::to_string_pretty(record)?)?;
    }
    Ok(table.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
