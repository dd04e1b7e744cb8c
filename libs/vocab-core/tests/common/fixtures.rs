//! Test fixtures and factory functions for creating test data.

use chrono::Utc;
use vocab_core::{CharacterDraft, CharacterRecord, Category, Config};

/// A freshly created character with no progress.
pub fn character(name: &str) -> CharacterRecord {
    CharacterDraft {
        name: name.to_string(),
        age: 11,
        class: 5,
        category: Some(Category::Human),
        portrait: Some("girl_03".to_string()),
    }
    .into_record(Utc::now(), &Config::default())
    .expect("valid draft")
}

/// Vocabulary file content with a header and `num_words` pairs.
///
/// # Arguments
/// * `num_words` - Number of data lines
/// * `delimiter` - Field separator for the data lines
pub fn vocabulary_csv(num_words: usize, delimiter: char) -> String {
    let mut lines = vec!["German,English".to_string()];
    lines.extend((1..=num_words).map(|i| format!("Wort{i}{delimiter}word{i}")));
    lines.join("\n")
}

/// Config with shuffling switched off so words keep file order.
pub fn ordered_config() -> Config {
    let mut config = Config::default();
    config.learning.randomize_word_order = false;
    config
}
