//! Answer matching for typed quiz answers.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the expected term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Compare a typed answer to the expected term.
///
/// Both sides are trimmed and case-folded, then compared for equality.
pub fn compare_answers(typed: &str, expected: &str) -> MatchResult {
    let typed_normalized = normalize(typed);
    let expected_normalized = normalize(expected);

    MatchResult {
        is_correct: typed_normalized == expected_normalized,
        typed_normalized,
        expected_normalized,
    }
}

/// Trim surrounding whitespace and case-fold.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
