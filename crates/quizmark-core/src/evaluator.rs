//! Answer evaluation: exact match on the normalized forms, then a strict
//! word-by-word fuzzy comparison.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::similarity::MatchPolicy;

/// How an answer was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Normalized forms are identical.
    Exact,
    /// Accepted with small typos.
    Tolerated,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        !matches!(self, Verdict::Incorrect)
    }
}

/// The outcome of comparing one answer, with both normalized forms so a
/// presenter can highlight near misses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub user_normalized: String,
    pub expected_normalized: String,
}

impl Evaluation {
    pub fn is_correct(&self) -> bool {
        self.verdict.is_correct()
    }
}

/// Compare a raw user answer to a raw expected answer with `policy`.
pub fn evaluate_with(user: &str, expected: &str, policy: &MatchPolicy) -> Evaluation {
    let user_normalized = normalize(user);
    let expected_normalized = normalize(expected);
    let verdict = judge(&user_normalized, &expected_normalized, policy);

    tracing::trace!(
        user = %user_normalized,
        expected = %expected_normalized,
        ?verdict,
        "evaluated answer"
    );

    Evaluation {
        verdict,
        user_normalized,
        expected_normalized,
    }
}

/// Compare with the default policy.
pub fn evaluate(user: &str, expected: &str) -> Evaluation {
    evaluate_with(user, expected, &MatchPolicy::default())
}

/// Whether `user` is an acceptable answer for `expected`.
pub fn is_correct(user: &str, expected: &str) -> bool {
    evaluate(user, expected).is_correct()
}

fn judge(user: &str, expected: &str, policy: &MatchPolicy) -> Verdict {
    // An empty answer never matches, even an expected answer that
    // normalizes to nothing.
    if user.is_empty() {
        return Verdict::Incorrect;
    }
    if user == expected {
        return Verdict::Exact;
    }

    let user_words: Vec<&str> = user.split_whitespace().collect();
    let expected_words: Vec<&str> = expected.split_whitespace().collect();

    if user_words.len() != expected_words.len() {
        return Verdict::Incorrect;
    }

    let all_match = expected_words
        .iter()
        .zip(&user_words)
        .all(|(exp, usr)| policy.word_matches(usr, exp));

    if all_match {
        Verdict::Tolerated
    } else {
        Verdict::Incorrect
    }
}
