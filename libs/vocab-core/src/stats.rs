//! Per-level progress counters.

use crate::date_utils;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable counters for one (character, difficulty) pair.
///
/// `total_words == correct_answers + wrong_answers` and
/// `best_streak >= current_streak` hold after every [`LevelStats::record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LevelStats {
    pub correct_answers: u32,
    pub wrong_answers: u32,
    /// Total attempts at this level.
    pub total_words: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    #[serde(with = "date_utils::lenient")]
    pub last_played: DateTime<Utc>,
}

impl LevelStats {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            correct_answers: 0,
            wrong_answers: 0,
            total_words: 0,
            current_streak: 0,
            best_streak: 0,
            last_played: now,
        }
    }

    /// Apply one answer.
    pub fn record(&mut self, correct: bool, at: DateTime<Utc>) {
        if correct {
            self.correct_answers += 1;
            self.current_streak += 1;
        } else {
            self.wrong_answers += 1;
            self.current_streak = 0;
        }
        self.total_words += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        // Clock skew must not move the timestamp backwards.
        self.last_played = self.last_played.max(at);
    }

    /// Share of correct answers in percent; 0 before the first attempt.
    pub fn accuracy(&self) -> f64 {
        if self.total_words == 0 {
            0.0
        } else {
            f64::from(self.correct_answers) / f64::from(self.total_words) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn longest_run(answers: &[bool]) -> u32 {
        let mut best = 0;
        let mut run = 0;
        for &correct in answers {
            run = if correct { run + 1 } else { 0 };
            best = best.max(run);
        }
        best
    }

    #[test]
    fn test_counts_match_answers() {
        let answers = [true, false, true, true, false, false, true];
        let mut stats = LevelStats::new(Utc::now());
        for &correct in &answers {
            stats.record(correct, Utc::now());
        }

        let k = answers.iter().filter(|c| **c).count() as u32;
        let n = answers.len() as u32;
        assert_eq!(stats.correct_answers, k);
        assert_eq!(stats.wrong_answers, n - k);
        assert_eq!(stats.total_words, n);
    }

    #[test]
    fn test_best_streak_is_longest_run() {
        let sequences: [&[bool]; 5] = [
            &[],
            &[false, false],
            &[true, true, true],
            &[true, true, false, true],
            &[true, false, true, true, true, false, true, true],
        ];

        for answers in sequences {
            let mut stats = LevelStats::new(Utc::now());
            for (i, &correct) in answers.iter().enumerate() {
                stats.record(correct, Utc::now());
                assert_eq!(stats.best_streak, longest_run(&answers[..=i]));
                assert!(stats.best_streak >= stats.current_streak);
            }
        }
    }

    #[test]
    fn test_miss_resets_streak_but_keeps_best() {
        let mut stats = LevelStats::new(Utc::now());
        stats.record(true, Utc::now());
        stats.record(true, Utc::now());
        stats.record(false, Utc::now());
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn test_last_played_only_moves_forward() {
        let now = Utc::now();
        let mut stats = LevelStats::new(now);
        stats.record(true, now - Duration::hours(3));
        assert_eq!(stats.last_played, now);

        let later = now + Duration::minutes(5);
        stats.record(false, later);
        assert_eq!(stats.last_played, later);
    }

    #[test]
    fn test_accuracy() {
        let mut stats = LevelStats::new(Utc::now());
        assert_eq!(stats.accuracy(), 0.0);
        stats.record(true, Utc::now());
        stats.record(true, Utc::now());
        stats.record(true, Utc::now());
        stats.record(false, Utc::now());
        assert_eq!(stats.accuracy(), 75.0);
    }
}
