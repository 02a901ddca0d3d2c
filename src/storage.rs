//! Object storage upload.
//!
//! Pushes a local directory's files to an S3 bucket, one object per file,
//! keyed by the file's path relative to the uploaded directory (forward
//! slashes regardless of platform). Credentials come from the client's
//! default provider chain (environment, shared credentials file, instance
//! profile); nothing secret lives in `aurn.toml`.
//!
//! Per-file failures are logged and skipped; there is no resumability
//! beyond re-running the upload.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use s3::creds::Credentials;
use s3::{Bucket, Region};

use crate::config::StorageSettings;
use crate::logging;

/// Outcome of a bulk upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadReport {
    pub uploaded: usize,
    pub failed: Vec<String>,
}

/// Object key for `file` within an upload rooted at `root`: the relative
/// path with `/` separators. Files outside `root` fall back to their bare
/// file name.
pub fn object_key(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Uploads every file under `directory` (recursively) to the configured
/// bucket. Returns a report of uploaded keys and per-file failures; a
/// failed file never aborts the batch.
pub fn upload_directory_to_s3(
    directory: impl AsRef<Path>,
    settings: &StorageSettings,
) -> Result<UploadReport, Box<dyn Error>> {
    let directory = directory.as_ref();
    let region: Region = settings
        .region
        .parse()
        .map_err(|e| format!("invalid storage region '{}': {:?}", settings.region, e))?;
    let credentials = Credentials::default()?;
    let bucket = Bucket::new(&settings.bucket, region, credentials)?;

    let mut files = Vec::new();
    collect_files(directory, &mut files)?;

    let mut report = UploadReport::default();
    for file in files {
        let key = object_key(directory, &file);
        let outcome = fs::read(&file)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                bucket
                    .put_object(&key, &bytes)
                    .map_err(|e| e.to_string())
            });
        match outcome {
            Ok(response) if response.status_code() == 200 => {
                report.uploaded += 1;
            }
            Ok(response) => {
                logging::log_upload_failure(&key, response.status_code());
                report.failed.push(key);
            }
            Err(message) => {
                logging::warn(
                    logging::DataSource::Storage,
                    None,
                    &format!("upload failed for {}: {}", key, message),
                );
                report.failed.push(key);
            }
        }
    }

    logging::info(
        logging::DataSource::Storage,
        None,
        &format!(
            "upload complete: {} objects in s3://{}, {} failed",
            report.uploaded,
            settings.bucket,
            report.failed.len()
        ),
    );
    Ok(report)
}

/// Collects regular files under `dir`, depth-first, in directory order.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
