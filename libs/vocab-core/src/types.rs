//! Core types for the vocabulary game.

use crate::config::Config;
use crate::date_utils;
use crate::stats::LevelStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Proficiency level selecting a vocabulary resource and a stats bucket.
///
/// Written as its upper-case tag; read in any case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String")]
pub enum Difficulty {
    #[default]
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Difficulty {
    /// All levels in ascending order.
    pub const ALL: [Difficulty; 6] = [
        Self::A1,
        Self::A2,
        Self::B1,
        Self::B2,
        Self::C1,
        Self::C2,
    ];

    /// Get the tag as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    /// Parse a tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(tag))
    }

    /// The level recommended after completing this one.
    pub fn next(self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|level| *level == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

/// Which side of a word pair is prompted.
///
/// Stored as `0` / `1` in both the config file and save files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    /// Prompt the source term, expect the target term.
    #[default]
    SourceToTarget,
    /// Prompt the target term, expect the source term.
    TargetToSource,
}

impl Direction {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::SourceToTarget => Self::TargetToSource,
            Self::TargetToSource => Self::SourceToTarget,
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::SourceToTarget => 0,
            Direction::TargetToSource => 1,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::SourceToTarget),
            1 => Ok(Self::TargetToSource),
            other => Err(format!("invalid language direction: {other}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceToTarget => f.write_str("source -> target"),
            Self::TargetToSource => f.write_str("target -> source"),
        }
    }
}

/// Character category; each one has its own portrait catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Human,
    Heroes,
    Monster,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Human, Self::Heroes, Self::Monster];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Heroes => "heroes",
            Self::Monster => "monster",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// One source/target term pair loaded from a vocabulary resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub source: String,
    pub target: String,
}

impl VocabularyWord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The term shown to the player.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceToTarget => &self.source,
            Direction::TargetToSource => &self.target,
        }
    }

    /// The term the player has to type.
    pub fn answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceToTarget => &self.target,
            Direction::TargetToSource => &self.source,
        }
    }
}

/// A player profile as stored in its save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CharacterRecord {
    pub name: String,
    pub age: u8,
    pub class: u8,
    pub category: Category,
    /// Portrait key into the asset catalog of `category`.
    #[serde(rename = "Character")]
    pub portrait: String,
    #[serde(rename = "CreatedDate", with = "date_utils::lenient")]
    pub created_at: DateTime<Utc>,
    /// Filename uniqueness token, fixed at creation.
    pub hash: String,
    #[serde(default)]
    pub current_difficulty: Difficulty,
    #[serde(default)]
    pub language_direction: Direction,
    #[serde(default)]
    pub level_stats: BTreeMap<Difficulty, LevelStats>,
}

impl CharacterRecord {
    /// Save file name derived from the name and hash.
    pub fn file_name(&self) -> String {
        format!("{}_{}.json", sanitize_file_stem(&self.name), self.hash)
    }

    /// Stats for a level, if the character has played it.
    pub fn stats(&self, difficulty: Difficulty) -> Option<&LevelStats> {
        self.level_stats.get(&difficulty)
    }

    /// Stats for a level, created on first use.
    pub fn stats_mut(&mut self, difficulty: Difficulty, now: DateTime<Utc>) -> &mut LevelStats {
        self.level_stats
            .entry(difficulty)
            .or_insert_with(|| LevelStats::new(now))
    }

    /// Record one answer at `difficulty`.
    pub fn record_answer(&mut self, difficulty: Difficulty, correct: bool, at: DateTime<Utc>) {
        self.stats_mut(difficulty, at).record(correct, at);
    }

    /// Adopt the configured level and direction before a session starts.
    pub fn apply_settings(&mut self, config: &Config) {
        self.current_difficulty = config.game.difficulty_level;
        self.language_direction = config.game.language_direction;
    }
}

/// Replace characters that are unsafe in file names.
pub(crate) fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "character".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> CharacterRecord {
        CharacterRecord {
            name: "Anna".to_string(),
            age: 12,
            class: 6,
            category: Category::Heroes,
            portrait: "knight_02".to_string(),
            created_at: Utc::now(),
            hash: "1a2b3c4d".to_string(),
            current_difficulty: Difficulty::B1,
            language_direction: Direction::TargetToSource,
            level_stats: BTreeMap::new(),
        }
    }

    #[test]
    fn test_difficulty_tags() {
        assert_eq!(Difficulty::from_tag(" b2 "), Some(Difficulty::B2));
        assert_eq!(Difficulty::from_tag("D1"), None);
        assert_eq!("C1".parse::<Difficulty>(), Ok(Difficulty::C1));
        assert_eq!(Difficulty::A1.next(), Some(Difficulty::A2));
        assert_eq!(Difficulty::C2.next(), None);
    }

    #[test]
    fn test_difficulty_reads_any_case() {
        assert_eq!(serde_json::to_string(&Difficulty::B1).unwrap(), "\"B1\"");
        let parsed: Difficulty = serde_json::from_str("\"b1\"").unwrap();
        assert_eq!(parsed, Difficulty::B1);
        assert!(serde_json::from_str::<Difficulty>("\"Z9\"").is_err());
    }

    #[test]
    fn test_direction_numeric_form() {
        assert_eq!(serde_json::to_string(&Direction::TargetToSource).unwrap(), "1");
        let parsed: Direction = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, Direction::SourceToTarget);
        assert!(serde_json::from_str::<Direction>("2").is_err());
    }

    #[test]
    fn test_word_sides() {
        let word = VocabularyWord::new("Haus", "house");
        assert_eq!(word.prompt(Direction::SourceToTarget), "Haus");
        assert_eq!(word.answer(Direction::SourceToTarget), "house");
        assert_eq!(word.prompt(Direction::TargetToSource), "house");
        assert_eq!(word.answer(Direction::TargetToSource), "Haus");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Monster".parse::<Category>(), Ok(Category::Monster));
        assert!("dragon".parse::<Category>().is_err());
    }

    #[test]
    fn test_file_name_sanitized() {
        let mut rec = record();
        rec.name = "Anna / Maria".to_string();
        assert_eq!(rec.file_name(), "Anna___Maria_1a2b3c4d.json");
    }

    #[test]
    fn test_record_json_shape() {
        let mut rec = record();
        rec.record_answer(Difficulty::B1, true, Utc::now());
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["Name"], "Anna");
        assert_eq!(json["Category"], "heroes");
        assert_eq!(json["Character"], "knight_02");
        assert_eq!(json["CurrentDifficulty"], "B1");
        assert_eq!(json["LanguageDirection"], 1);
        assert_eq!(json["LevelStats"]["B1"]["CorrectAnswers"], 1);
    }

    #[test]
    fn test_legacy_record_without_progress_fields() {
        let json = r#"{
            "Name": "Tom",
            "Age": 9,
            "Class": 4,
            "Category": "monster",
            "Character": "slime",
            "CreatedDate": "2024-03-01T18:22:05.1234567",
            "Hash": "deadbeef"
        }"#;
        let rec: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.current_difficulty, Difficulty::A1);
        assert_eq!(rec.language_direction, Direction::SourceToTarget);
        assert!(rec.level_stats.is_empty());
        assert_eq!(rec.file_name(), "Tom_deadbeef.json");
    }

    #[test]
    fn test_apply_settings() {
        let mut rec = record();
        let mut config = Config::default();
        config.game.difficulty_level = Difficulty::C2;
        config.game.language_direction = Direction::SourceToTarget;

        rec.apply_settings(&config);
        assert_eq!(rec.current_difficulty, Difficulty::C2);
        assert_eq!(rec.language_direction, Direction::SourceToTarget);
    }
}
