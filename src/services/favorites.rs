//! Favorites: the ordered bookmark list.
//!
//! Stored as `favorites.json`. Files written before entries carried ids
//! hold bare `[url, title]` pairs; those are migrated on open and rewritten
//! in the current format.

#[cfg(test)]
#[path = "favorites_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::persistence::{legacy_pairs, load_json, save_logged};

const FILE_NAME: &str = "favorites.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub url: String,
    pub title: String,
}

impl Favorite {
    /// A new favorite. An empty title is replaced by the URL.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let url = url.into();
        let title = title.into();
        let title = if title.is_empty() { url.clone() } else { title };
        Self { id: Uuid::new_v4(), url, title }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FavoritesFile {
    Current(Vec<Favorite>),
    Legacy(Vec<Vec<String>>),
}

pub struct FavoritesStore {
    path: PathBuf,
    items: Vec<Favorite>,
}

impl FavoritesStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(FILE_NAME);
        let items = match load_json::<FavoritesFile>(&path) {
            Ok(Some(FavoritesFile::Current(items))) => items,
            Ok(Some(FavoritesFile::Legacy(rows))) => {
                let items: Vec<Favorite> =
                    legacy_pairs(rows).into_iter().map(|(url, title)| Favorite::new(url, title)).collect();
                info!(count = items.len(), "migrated legacy favorites");
                if !items.is_empty() {
                    save_logged(&path, &items);
                }
                items
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "favorites unreadable, starting empty");
                Vec::new()
            }
        };
        Self { path, items }
    }

    #[must_use]
    pub fn list(&self) -> &[Favorite] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Favorite> {
        self.items.get(index)
    }

    pub fn add(&mut self, url: &str, title: &str) {
        self.items.push(Favorite::new(url, title));
        save_logged(&self.path, &self.items);
    }

    /// Remove the favorite at `index`. Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Favorite> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        save_logged(&self.path, &self.items);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        save_logged(&self.path, &self.items);
    }
}
