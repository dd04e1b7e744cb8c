//! Character save files.
//!
//! One pretty-printed JSON file per character, named
//! `<sanitized name>_<hash>.json`, all in a single directory. Older saves
//! named after the raw character name are loaded as-is and replaced by the
//! sanitized file on their next save.

use crate::error::{Error, Result};
use crate::types::CharacterRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const EXTENSION: &str = "json";

/// Storage for character records.
pub trait CharacterRepository {
    /// Every readable record; unreadable files are skipped.
    fn list_all(&self) -> Vec<CharacterRecord>;
    /// The record stored under `identifier` (its file name).
    fn load(&self, identifier: &str) -> Result<CharacterRecord>;
    /// Write `record`, replacing any previous version.
    fn save(&self, record: &CharacterRecord) -> Result<PathBuf>;
    /// Number of save files present.
    fn count(&self) -> usize;
}

/// File-system implementation of [`CharacterRepository`].
#[derive(Debug, Clone)]
pub struct CharacterStore {
    dir: PathBuf,
}

impl CharacterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the save file for `record`.
    pub fn path_for(&self, record: &CharacterRecord) -> PathBuf {
        self.dir.join(record.file_name())
    }

    /// Where older versions of the game saved `record`: the raw name, unsanitized.
    ///
    /// `None` when that is the current file name or could not be a bare file name.
    fn legacy_path(&self, record: &CharacterRecord) -> Option<PathBuf> {
        let legacy = format!("{}_{}.{EXTENSION}", record.name, record.hash);
        if legacy == record.file_name() || legacy.contains(['/', '\\']) {
            return None;
        }
        Some(self.dir.join(legacy))
    }

    /// Drop the legacy copy of `record` once the current file is written.
    fn remove_legacy_file(&self, record: &CharacterRecord) {
        let Some(legacy) = self.legacy_path(record) else {
            return;
        };
        if !legacy.is_file() {
            return;
        }
        match fs::remove_file(&legacy) {
            Ok(()) => info!(path = %legacy.display(), "Removed legacy save file"),
            Err(e) => warn!(path = %legacy.display(), error = %e, "Could not remove legacy save file"),
        }
    }

    fn save_files(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(dir = %self.dir.display(), error = %e, "Could not read save directory");
                }
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION))
            .collect();
        files.sort();
        files
    }

    fn read_record(path: &Path) -> Result<CharacterRecord> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::parse(path, e))
    }
}

impl CharacterRepository for CharacterStore {
    fn list_all(&self) -> Vec<CharacterRecord> {
        self.save_files()
            .iter()
            .filter_map(|path| match Self::read_record(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable save file");
                    None
                }
            })
            .collect()
    }

    fn load(&self, identifier: &str) -> Result<CharacterRecord> {
        let identifier = identifier.trim();
        // Identifiers are bare file names; anything path-like never names a save file.
        if identifier.is_empty()
            || identifier.contains(['/', '\\'])
            || identifier == "."
            || identifier == ".."
        {
            return Err(Error::NotFound(identifier.to_string()));
        }

        let file_name = if Path::new(identifier)
            .extension()
            .is_some_and(|ext| ext == EXTENSION)
        {
            identifier.to_string()
        } else {
            format!("{identifier}.{EXTENSION}")
        };

        let path = self.dir.join(&file_name);
        if !path.is_file() {
            return Err(Error::NotFound(file_name));
        }
        debug!(path = %path.display(), "Loading character");
        Self::read_record(&path)
    }

    fn save(&self, record: &CharacterRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        let path = self.path_for(record);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
        info!(path = %path.display(), "Saved character");
        self.remove_legacy_file(record);
        Ok(path)
    }

    fn count(&self) -> usize {
        self.save_files().len()
    }
}
