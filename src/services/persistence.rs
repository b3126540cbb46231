//! Persistence service: JSON files under the data directory.
//!
//! DESIGN
//! ======
//! Each store owns one file and rewrites it whole after every mutation.
//! Writes go to a sibling temp file that is then renamed over the target,
//! so a crash mid-write leaves the previous contents in place.
//!
//! ERROR HANDLING
//! ==============
//! Read failures are returned to the store, which falls back to defaults
//! and logs. Write failures are returned as well; stores log them and keep
//! the in-memory state, so input handling never stops on a full disk.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store json error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode `path`. A missing file is `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
}

/// Encode `value` and replace `path` with it, creating parent directories.
///
/// # Errors
///
/// Returns an error if encoding, writing or the final rename fails.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let encoded =
        serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, encoded).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

/// Load `path`, or `fallback` when it is missing or unreadable.
pub fn load_or<T: DeserializeOwned>(path: &Path, fallback: T) -> T {
    match load_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(e) => {
            warn!(error = %e, "store unreadable, starting from defaults");
            fallback
        }
    }
}

/// Save and log on failure. Returns whether the write succeeded.
pub fn save_logged<T: Serialize + ?Sized>(path: &Path, value: &T) -> bool {
    match save_json(path, value) {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "store write failed");
            false
        }
    }
}

/// Pre-v2 list files stored `[url, title]` string pairs. Entries with fewer
/// than two fields or a blank URL are dropped.
#[must_use]
pub fn legacy_pairs(rows: Vec<Vec<String>>) -> Vec<(String, String)> {
    rows.into_iter()
        .filter_map(|row| {
            let mut fields = row.into_iter();
            let url = fields.next()?;
            let title = fields.next()?;
            (!url.trim().is_empty()).then_some((url, title))
        })
        .collect()
}
