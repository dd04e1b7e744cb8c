//! A character playing through one level, saved after every answer.

use crate::error::{Error, Result};
use crate::session::{AnswerOutcome, QuizSession, SessionState};
use crate::stats::LevelStats;
use crate::store::CharacterRepository;
use crate::types::{CharacterRecord, Difficulty, VocabularyWord};
use crate::vocabulary::VocabularyLoader;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::warn;

/// What the front-end shows after an answer.
#[derive(Debug)]
pub struct Feedback {
    pub outcome: AnswerOutcome,
    /// Set when the record could not be written; progress is still held in memory.
    pub persist_error: Option<Error>,
}

/// Figures for the level-complete screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub difficulty: Difficulty,
    pub correct_this_run: u32,
    pub answered_this_run: u32,
    pub total_words: usize,
    /// Durable counters for the level, if any answer was ever recorded.
    pub stats: Option<LevelStats>,
    pub next_difficulty: Option<Difficulty>,
    pub elapsed: Duration,
}

/// Couples a [`QuizSession`] with the record it updates and the store it saves to.
pub struct LevelRun<'a, S: CharacterRepository> {
    record: CharacterRecord,
    store: &'a S,
    session: QuizSession,
}

impl<'a, S: CharacterRepository> LevelRun<'a, S> {
    /// Load the pool for the record's current level and start a session.
    pub fn begin(record: CharacterRecord, store: &'a S, loader: &VocabularyLoader) -> Self {
        let words = loader.load(record.current_difficulty);
        Self::with_words(record, store, words)
    }

    /// Start a session over an already loaded pool.
    pub fn with_words(record: CharacterRecord, store: &'a S, words: Vec<VocabularyWord>) -> Self {
        let session = QuizSession::start(words, record.current_difficulty, record.language_direction);
        Self {
            record,
            store,
            session,
        }
    }

    /// Like [`LevelRun::with_words`] with reproducible draws.
    pub fn with_words_and_rng(
        record: CharacterRecord,
        store: &'a S,
        words: Vec<VocabularyWord>,
        rng: StdRng,
    ) -> Self {
        let session = QuizSession::start_with_rng(
            words,
            record.current_difficulty,
            record.language_direction,
            rng,
        );
        Self {
            record,
            store,
            session,
        }
    }

    /// Score an answer and save the record.
    pub fn submit_answer(&mut self, answer: &str) -> Result<Feedback> {
        let outcome = self.session.submit_answer(answer, &mut self.record)?;
        let persist_error = self.persist().err();
        Ok(Feedback {
            outcome,
            persist_error,
        })
    }

    pub fn acknowledge_and_continue(&mut self) -> Result<SessionState> {
        self.session.acknowledge_and_continue()
    }

    /// Save one last time and hand the record back.
    pub fn finish(self) -> (CharacterRecord, Result<()>) {
        let saved = self.persist();
        (self.record, saved)
    }

    pub fn summary(&self) -> LevelSummary {
        let difficulty = self.session.difficulty();
        LevelSummary {
            difficulty,
            correct_this_run: self.session.correct_this_run(),
            answered_this_run: self.session.answered_this_run(),
            total_words: self.session.total_words(),
            stats: self.record.stats(difficulty).cloned(),
            next_difficulty: difficulty.next(),
            elapsed: self.session.elapsed(),
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.record).map(|_| ()).map_err(|e| {
            warn!(character = %self.record.name, error = %e, "Progress not saved");
            e
        })
    }
}
