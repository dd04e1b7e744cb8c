//! Game settings file.
//!
//! A TOML file with four sections:
//!
//! ```toml
//! [GameSettings]
//! LanguageDirection = 0
//! DifficultyLevel = "A1"
//!
//! [LearningSettings]
//! RandomizeWordOrder = true
//! ```
//!
//! Every key has a default. A missing file is regenerated, and a missing or
//! malformed key falls back to its default without touching its neighbours.

use crate::error::{Error, Result};
use crate::types::{Difficulty, Direction};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const HEADER: &str = "# Vocab Quest settings. Keys left out fall back to their defaults.\n\n";

/// All settings, constructed once at startup and passed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "GameSettings", default)]
    pub game: GameSettings,
    #[serde(rename = "DisplaySettings", default)]
    pub display: DisplaySettings,
    #[serde(rename = "LearningSettings", default)]
    pub learning: LearningSettings,
    #[serde(rename = "Statistics", default)]
    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GameSettings {
    pub language_direction: Direction,
    pub difficulty_level: Difficulty,
    pub max_errors_per_level: u32,
    pub show_hints: bool,
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            language_direction: Direction::SourceToTarget,
            difficulty_level: Difficulty::A1,
            max_errors_per_level: 3,
            show_hints: true,
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DisplaySettings {
    pub theme: String,
    pub font_size: u32,
    pub show_progress_bar: bool,
    pub show_character_info: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: "Light".to_string(),
            font_size: 14,
            show_progress_bar: true,
            show_character_info: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LearningSettings {
    pub repeat_failed_words: bool,
    /// Shuffle the word list right after loading it.
    pub randomize_word_order: bool,
    pub show_word_frequency: bool,
    pub practice_mode: bool,
}

impl Default for LearningSettings {
    fn default() -> Self {
        Self {
            repeat_failed_words: true,
            randomize_word_order: true,
            show_word_frequency: true,
            practice_mode: false,
        }
    }
}

/// Lifetime totals across all characters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Statistics {
    pub total_words_learned: u64,
    /// Seconds spent in quiz sessions.
    pub total_time_spent: u64,
    pub streak_days: u32,
}

impl Statistics {
    /// Add the outcome of one finished session.
    pub fn record_session(&mut self, words_learned: u32, elapsed: Duration) {
        self.total_words_learned += u64::from(words_learned);
        self.total_time_spent += elapsed.as_secs();
    }
}

impl Config {
    /// Load settings from `path`, writing a default file if none exists.
    ///
    /// Never fails: unreadable or malformed files are logged and defaults used.
    pub fn load_or_create(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_lenient(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                match config.save(path) {
                    Ok(()) => info!(path = %path.display(), "Created default config"),
                    Err(e) => warn!(error = %e, "Could not write default config"),
                }
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read config, using defaults");
                Self::default()
            }
        }
    }

    /// Strict parse; any malformed value is an error.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse key by key, replacing broken values with their defaults.
    pub fn from_toml_lenient(content: &str, path: &Path) -> Self {
        let table = match content.parse::<toml::Table>() {
            Ok(table) => table,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config is not valid TOML, using defaults");
                return Self::default();
            }
        };

        Self {
            game: section(&table, "GameSettings"),
            display: section(&table, "DisplaySettings"),
            learning: section(&table, "LearningSettings"),
            statistics: section(&table, "Statistics"),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("{HEADER}{body}"))
    }

    /// Write the settings to `path`, creating the directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}

/// Read one section key by key.
///
/// Each key found in the file is laid over the section defaults and kept only
/// if the section still deserializes, so a bad value resets just that key.
fn section<T: Serialize + DeserializeOwned + Default>(table: &toml::Table, name: &str) -> T {
    let Some(value) = table.get(name) else {
        return T::default();
    };
    let Some(found) = value.as_table() else {
        warn!(section = name, "Config section is not a table, using defaults");
        return T::default();
    };
    let mut merged = match toml::Value::try_from(T::default()) {
        Ok(toml::Value::Table(defaults)) => defaults,
        _ => return T::default(),
    };

    for (key, candidate) in found {
        let mut trial = merged.clone();
        trial.insert(key.clone(), candidate.clone());
        match toml::Value::Table(trial.clone()).try_into::<T>() {
            Ok(_) => merged = trial,
            Err(e) => warn!(section = name, key = %key, error = %e, "Invalid config value, using default"),
        }
    }

    toml::Value::Table(merged).try_into().unwrap_or_default()
}
