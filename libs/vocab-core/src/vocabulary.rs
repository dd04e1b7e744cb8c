//! Vocabulary list loader.
//!
//! # Format
//! One file per difficulty, named after the tag (`A1.csv`, `B2.csv`, ...):
//! ```text
//! German,English
//! Haus,house
//! Baum;tree
//! ```
//! The first line is a header and always skipped. Each data line holds a
//! source and a target term separated by a comma or, when the line has no
//! comma-separated pair, a semicolon.

use crate::config::Config;
use crate::types::{Difficulty, VocabularyWord};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads word pools from a directory of delimited text files.
#[derive(Debug, Clone)]
pub struct VocabularyLoader {
    dir: PathBuf,
    shuffle: bool,
}

impl VocabularyLoader {
    pub fn new(dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            dir: dir.into(),
            shuffle: config.learning.randomize_word_order,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the resource for `difficulty`.
    pub fn resource_path(&self, difficulty: Difficulty) -> PathBuf {
        self.dir.join(format!("{}.csv", difficulty.as_str()))
    }

    /// Load the words for `difficulty`.
    ///
    /// A missing or unreadable resource yields an empty list; callers show
    /// that as "no vocabulary available".
    pub fn load(&self, difficulty: Difficulty) -> Vec<VocabularyWord> {
        self.load_with_rng(difficulty, &mut rand::thread_rng())
    }

    pub fn load_with_rng<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Vec<VocabularyWord> {
        let path = self.resource_path(difficulty);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(%difficulty, path = %path.display(), "No vocabulary resource");
                return Vec::new();
            }
            Err(e) => {
                warn!(%difficulty, path = %path.display(), error = %e, "Could not read vocabulary resource");
                return Vec::new();
            }
        };

        let mut words = parse_words(&content);
        if self.shuffle {
            words.shuffle(rng);
        }
        info!(%difficulty, count = words.len(), shuffled = self.shuffle, "Loaded vocabulary");
        words
    }
}

/// Parse a vocabulary resource, skipping the header line.
pub fn parse_words(content: &str) -> Vec<VocabularyWord> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| {
            let word = parse_line(line);
            if word.is_none() {
                debug!(line = idx + 1, content = line, "Skipping vocabulary line");
            }
            word
        })
        .collect()
}

fn parse_line(line: &str) -> Option<VocabularyWord> {
    let mut fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 2 {
        fields = line.split(';').collect();
    }
    let source = fields.first()?.trim();
    let target = fields.get(1)?.trim();
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some(VocabularyWord::new(source, target))
}
