//! Character creation: draft validation and the save-file hash.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Category, CharacterRecord};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 1..=99;
pub const CLASS_RANGE: std::ops::RangeInclusive<u8> = 1..=13;

/// Fields collected by a character-creation screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    pub name: String,
    pub age: u8,
    pub class: u8,
    pub category: Option<Category>,
    pub portrait: Option<String>,
}

impl CharacterDraft {
    /// Check every field, reporting the first one that is missing or out of range.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidCharacter("name must not be empty".into()));
        }
        if !AGE_RANGE.contains(&self.age) {
            return Err(Error::InvalidCharacter(format!(
                "age must be between 1 and 99, got {}",
                self.age
            )));
        }
        if !CLASS_RANGE.contains(&self.class) {
            return Err(Error::InvalidCharacter(format!(
                "class must be between 1 and 13, got {}",
                self.class
            )));
        }
        if self.category.is_none() {
            return Err(Error::InvalidCharacter("no category selected".into()));
        }
        if self.portrait.as_deref().map_or(true, |p| p.trim().is_empty()) {
            return Err(Error::InvalidCharacter("no portrait selected".into()));
        }
        Ok(())
    }

    /// Validate and turn the draft into a new record with no progress yet.
    pub fn into_record(self, created_at: DateTime<Utc>, config: &Config) -> Result<CharacterRecord> {
        self.validate()?;
        let (Some(category), Some(portrait)) = (self.category, self.portrait) else {
            return Err(Error::InvalidCharacter("incomplete draft".into()));
        };

        Ok(CharacterRecord {
            name: self.name.trim().to_string(),
            age: self.age,
            class: self.class,
            category,
            portrait: portrait.trim().to_string(),
            hash: generate_hash(self.age, self.class, created_at),
            created_at,
            current_difficulty: config.game.difficulty_level,
            language_direction: config.game.language_direction,
            level_stats: BTreeMap::new(),
        })
    }
}

/// Short token that keeps save-file names of same-named characters apart.
///
/// First four bytes of SHA-256 over age, class and creation time, as eight
/// lowercase hex digits. Not an integrity check.
pub fn generate_hash(age: u8, class: u8, created_at: DateTime<Utc>) -> String {
    let nanos = created_at
        .timestamp_nanos_opt()
        .unwrap_or_else(|| created_at.timestamp_micros());
    let mut hasher = Sha256::new();
    hasher.update(format!("{age}{class}{nanos}").as_bytes());
    hasher.finalize()[..4]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
