//! Visit history, newest first.
//!
//! A visit is recorded each time a page finishes loading. Reloading the
//! page already at the head of the list records nothing, and the list is
//! capped at [`MAX_ENTRIES`] with the oldest visit evicted.

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::persistence::{legacy_pairs, load_json, save_logged};

pub const MAX_ENTRIES: usize = 100;

const FILE_NAME: &str = "history.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), url: url.into(), title: title.into(), timestamp: OffsetDateTime::now_utc() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Current(Vec<HistoryEntry>),
    Legacy(Vec<Vec<String>>),
}

pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(FILE_NAME);
        let entries = match load_json::<HistoryFile>(&path) {
            Ok(Some(HistoryFile::Current(entries))) => entries,
            Ok(Some(HistoryFile::Legacy(rows))) => {
                let entries: Vec<HistoryEntry> =
                    legacy_pairs(rows).into_iter().map(|(url, title)| HistoryEntry::new(url, title)).collect();
                info!(count = entries.len(), "migrated legacy history");
                if !entries.is_empty() {
                    save_logged(&path, &entries);
                }
                entries
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "history unreadable, starting empty");
                Vec::new()
            }
        };
        Self { path, entries }
    }

    /// Entries, newest first.
    #[must_use]
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Record a visit. Returns `false` when `url` is already the newest entry.
    pub fn add(&mut self, url: &str, title: &str) -> bool {
        if self.entries.first().is_some_and(|e| e.url == url) {
            return false;
        }
        self.entries.insert(0, HistoryEntry::new(url, title));
        self.entries.truncate(MAX_ENTRIES);
        save_logged(&self.path, &self.entries);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        save_logged(&self.path, &self.entries);
    }
}
