//! Core engine of the vocabulary game, shared by every front-end.
//!
//! Provides:
//! - Character save files (JSON, one per character)
//! - Vocabulary loading from delimited word lists, one per difficulty
//! - The quiz session state machine and answer matching
//! - Per-level statistics
//! - The sectioned settings file

pub mod character;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod matching;
pub mod run;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;
pub mod vocabulary;

pub use character::{generate_hash, CharacterDraft};
pub use config::Config;
pub use error::{Error, Result};
pub use matching::{compare_answers, normalize, MatchResult};
pub use run::{Feedback, LevelRun, LevelSummary};
pub use session::{AnswerOutcome, QuizSession, SessionState};
pub use stats::LevelStats;
pub use store::{CharacterRepository, CharacterStore};
pub use types::{Category, CharacterRecord, Difficulty, Direction, VocabularyWord};
pub use vocabulary::{parse_words, VocabularyLoader};
