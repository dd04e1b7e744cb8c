//! Where the game keeps its files.

use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the data root.
pub const HOME_VAR: &str = "VOCAB_QUEST_HOME";

/// Data root and the fixed layout beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub saves_dir: PathBuf,
    pub vocabulary_dir: PathBuf,
}

impl AppPaths {
    /// `$VOCAB_QUEST_HOME` if set, otherwise the platform data directory.
    pub fn resolve() -> Self {
        match std::env::var_os(HOME_VAR) {
            Some(root) if !root.is_empty() => Self::from_root(root),
            _ => Self::from_root(default_root()),
        }
    }

    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join("config").join("config.toml"),
            saves_dir: root.join("savefiles"),
            vocabulary_dir: root.join("vocabulary"),
            root,
        }
    }

    /// Create the save and vocabulary directories.
    ///
    /// The config directory is created when the config is first written.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.saves_dir)?;
        fs::create_dir_all(&self.vocabulary_dir)
    }
}

fn default_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-quest")
}
