//! Persisted favorites: a set of cca3 ids, written back on every change.
//!
//! The store is a single JSON array behind a narrow [`FavoritesBackend`]
//! seam, so the concrete storage (a file under the platform data dir here)
//! could be swapped for something else without touching filter or selection
//! code. A missing or corrupt store degrades to an empty set; it never
//! blocks startup.

use ahash::AHashSet;
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Where favorite ids are read from and written to.
///
/// `read` returns `None` when there is no stored content yet; `write`
/// replaces the whole content. Both operate on the raw JSON string.
pub trait FavoritesBackend {
    fn read(&self) -> Option<String>;
    fn write(&self, contents: &str) -> Result<()>;
}

/// File-backed store: one JSON file, replaced atomically on every write
/// (temp file in the same directory, then rename).
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Store at an explicit path. Used directly in tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user default location, e.g. `~/.local/share/atlas-rs/favorites.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("atlas-rs").join("favorites.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesBackend for FileBackend {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&self, contents: &str) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("favorites path has no parent directory")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("create data dir {}", dir.display()))?;
        let tmp = tempfile::NamedTempFile::new_in(dir).context("create temp file")?;
        fs::write(tmp.path(), contents).context("write favorites")?;
        tmp.persist(&self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory backend, mostly for tests and for running without a data dir.
#[derive(Debug, Default)]
pub struct MemBackend {
    contents: Mutex<Option<String>>,
}

impl FavoritesBackend for MemBackend {
    fn read(&self) -> Option<String> {
        self.contents.lock().expect("favorites lock").clone()
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self.contents.lock().expect("favorites lock") = Some(contents.to_string());
        Ok(())
    }
}

/// The user's favorite countries, persisted through a [`FavoritesBackend`].
pub struct Favorites {
    ids: AHashSet<String>,
    backend: Box<dyn FavoritesBackend>,
    rev: u64,
}

impl Favorites {
    /// Load from the backend. Absent or unparseable content yields an empty
    /// set; a corrupt store is worth a warning, never a failure.
    pub fn load(backend: Box<dyn FavoritesBackend>) -> Self {
        let ids = match backend.read() {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list.into_iter().collect(),
                Err(e) => {
                    warn!("ignoring corrupt favorites store: {}", e);
                    AHashSet::new()
                }
            },
            None => AHashSet::new(),
        };
        Self {
            ids,
            backend,
            rev: 0,
        }
    }

    /// Empty set over an in-memory backend.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemBackend::default()))
    }

    /// Symmetric add/remove; persists the full set after every mutation.
    /// Returns the new membership of `id`.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.rev += 1;
        self.persist();
        now_favorite
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bumped on every mutation; used as a memoization key by the filter
    /// cache.
    pub fn revision(&self) -> u64 {
        self.rev
    }

    /// Ids in sorted order, for stable files and display.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    // Fire-and-forget: a failed write costs the user their favorites on the
    // next start, it must not interrupt the session.
    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.sorted_ids()) {
            Ok(s) => s,
            Err(e) => {
                warn!("could not encode favorites: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.write(&encoded) {
            warn!("could not persist favorites: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut favs = Favorites::in_memory();
        assert!(favs.toggle("BRA"));
        assert!(favs.contains("BRA"));
        assert!(!favs.toggle("BRA"));
        assert!(!favs.contains("BRA"));
        assert!(favs.is_empty());
    }

    #[test]
    fn corrupt_store_degrades_to_empty() {
        let backend = MemBackend::default();
        backend.write("{not json[").unwrap();
        let favs = Favorites::load(Box::new(backend));
        assert!(favs.is_empty());
    }
}
