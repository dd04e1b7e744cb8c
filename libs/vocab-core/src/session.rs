//! Quiz session state machine.
//!
//! ```text
//! start ──► AwaitingAnswer ──submit_answer──► Scored ──acknowledge──┐
//!   │             ▲                                                 │
//!   │             └──────────────── draw_next (pool left) ◄─────────┘
//!   │                                   │
//!   ▼                                   ▼ (pool empty)
//! Empty                           LevelComplete
//! ```
//!
//! The session never sleeps or schedules anything; a front-end that wants an
//! auto-advance delay waits and then calls [`QuizSession::acknowledge_and_continue`].

use crate::error::{Error, Result};
use crate::matching::compare_answers;
use crate::types::{CharacterRecord, Difficulty, Direction, VocabularyWord};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer,
    Scored,
    /// Every word has been asked and scored.
    LevelComplete,
    /// The level has no vocabulary at all.
    Empty,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingAnswer => "awaiting an answer",
            Self::Scored => "scored",
            Self::LevelComplete => "complete",
            Self::Empty => "empty",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::LevelComplete | Self::Empty)
    }
}

/// Result of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The expected answer, trimmed and case-folded.
    pub expected: String,
    /// The submitted answer, trimmed and case-folded.
    pub submitted: String,
    /// Run streak after this answer.
    pub streak: u32,
}

/// One pass over a level's word pool.
#[derive(Debug)]
pub struct QuizSession {
    state: SessionState,
    difficulty: Difficulty,
    direction: Direction,
    remaining: Vec<VocabularyWord>,
    current: Option<VocabularyWord>,
    total_words: usize,
    asked: usize,
    correct_this_run: u32,
    answered_this_run: u32,
    streak_this_run: u32,
    started_at: DateTime<Utc>,
    rng: StdRng,
}

impl QuizSession {
    /// Start a session over `pool`; an empty pool ends in [`SessionState::Empty`].
    pub fn start(pool: Vec<VocabularyWord>, difficulty: Difficulty, direction: Direction) -> Self {
        Self::start_with_rng(pool, difficulty, direction, StdRng::from_entropy())
    }

    /// Like [`QuizSession::start`] with a caller-provided RNG for reproducible draws.
    pub fn start_with_rng(
        pool: Vec<VocabularyWord>,
        difficulty: Difficulty,
        direction: Direction,
        rng: StdRng,
    ) -> Self {
        let mut session = Self {
            state: SessionState::Empty,
            difficulty,
            direction,
            total_words: pool.len(),
            remaining: pool,
            current: None,
            asked: 0,
            correct_this_run: 0,
            answered_this_run: 0,
            streak_this_run: 0,
            started_at: Utc::now(),
            rng,
        };

        if session.remaining.is_empty() {
            info!(%difficulty, "No vocabulary for level");
        } else {
            session.take_random_word();
        }
        session
    }

    /// Draw the next word, or finish the level when the pool is exhausted.
    ///
    /// Fails while a drawn word is still unanswered. In a terminal state this
    /// does nothing and reports that state.
    pub fn draw_next(&mut self) -> Result<SessionState> {
        match self.state {
            SessionState::AwaitingAnswer => Err(self.invalid("draw a new word")),
            SessionState::LevelComplete | SessionState::Empty => Ok(self.state),
            SessionState::Scored => {
                if self.remaining.is_empty() {
                    self.current = None;
                    self.state = SessionState::LevelComplete;
                    info!(
                        difficulty = %self.difficulty,
                        correct = self.correct_this_run,
                        total = self.total_words,
                        "Level complete"
                    );
                } else {
                    self.take_random_word();
                }
                Ok(self.state)
            }
        }
    }

    /// Score `answer` against the current word and record it into `record`.
    pub fn submit_answer(
        &mut self,
        answer: &str,
        record: &mut CharacterRecord,
    ) -> Result<AnswerOutcome> {
        if self.state != SessionState::AwaitingAnswer {
            return Err(self.invalid("submit an answer"));
        }
        let word = self
            .current
            .as_ref()
            .ok_or_else(|| self.invalid("submit an answer"))?;

        let result = compare_answers(answer, word.answer(self.direction));
        if result.is_correct {
            self.correct_this_run += 1;
            self.streak_this_run += 1;
        } else {
            self.streak_this_run = 0;
        }
        self.answered_this_run += 1;
        record.record_answer(self.difficulty, result.is_correct, Utc::now());
        self.state = SessionState::Scored;

        debug!(
            correct = result.is_correct,
            streak = self.streak_this_run,
            remaining = self.remaining.len(),
            "Answer scored"
        );

        Ok(AnswerOutcome {
            correct: result.is_correct,
            expected: result.expected_normalized,
            submitted: result.typed_normalized,
            streak: self.streak_this_run,
        })
    }

    /// Leave the feedback step and move on.
    pub fn acknowledge_and_continue(&mut self) -> Result<SessionState> {
        if self.state != SessionState::Scored {
            return Err(self.invalid("continue"));
        }
        self.draw_next()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The word currently being asked or just scored.
    pub fn current_word(&self) -> Option<&VocabularyWord> {
        self.current.as_ref()
    }

    /// The term shown to the player for the current word.
    pub fn prompt(&self) -> Option<&str> {
        self.current.as_ref().map(|w| w.prompt(self.direction))
    }

    /// Words not yet drawn.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Words drawn so far, including the current one.
    pub fn asked(&self) -> usize {
        self.asked
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn correct_this_run(&self) -> u32 {
        self.correct_this_run
    }

    pub fn answered_this_run(&self) -> u32 {
        self.answered_this_run
    }

    pub fn streak_this_run(&self) -> u32 {
        self.streak_this_run
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall-clock time since the session started.
    pub fn elapsed(&self) -> std::time::Duration {
        (Utc::now() - self.started_at).to_std().unwrap_or_default()
    }

    fn take_random_word(&mut self) {
        let idx = self.rng.gen_range(0..self.remaining.len());
        self.current = Some(self.remaining.swap_remove(idx));
        self.asked += 1;
        self.state = SessionState::AwaitingAnswer;
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.state.as_str(),
        }
    }
}
