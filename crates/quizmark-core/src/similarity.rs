//! Edit distance and the per-word typo tolerance.

use serde::{Deserialize, Serialize};

/// Levenshtein distance between two strings, counted in `char`s.
///
/// Insertions, deletions and substitutions each cost 1.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the (len(a)+1) x (len(b)+1) table.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// How many typos a word may contain and still count as correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Expected words with at least this many characters get a tolerance.
    #[serde(default = "default_long_word_min_len")]
    pub long_word_min_len: usize,
    /// Edit distance allowed for long words. Short words must match exactly.
    #[serde(default = "default_long_word_tolerance")]
    pub long_word_tolerance: usize,
}

fn default_long_word_min_len() -> usize {
    5
}

fn default_long_word_tolerance() -> usize {
    1
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            long_word_min_len: default_long_word_min_len(),
            long_word_tolerance: default_long_word_tolerance(),
        }
    }
}

impl MatchPolicy {
    /// Allowed distance for an expected word.
    pub fn tolerance(&self, expected_word: &str) -> usize {
        if expected_word.chars().count() < self.long_word_min_len {
            0
        } else {
            self.long_word_tolerance
        }
    }

    /// Whether `user_word` is an acceptable spelling of `expected_word`.
    ///
    /// First and last characters must agree exactly; this rejects a
    /// different word of similar shape before any distance is computed.
    pub fn word_matches(&self, user_word: &str, expected_word: &str) -> bool {
        if user_word.is_empty() {
            return false;
        }
        if user_word.chars().next() != expected_word.chars().next()
            || user_word.chars().next_back() != expected_word.chars().next_back()
        {
            return false;
        }
        distance(user_word, expected_word) <= self.tolerance(expected_word)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_distance_symmetric(a in "[a-e]{0,12}", b in "[a-e]{0,12}") {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        #[test]
        fn prop_distance_identity(a in ".{0,20}") {
            prop_assert_eq!(distance(&a, &a), 0);
        }

        #[test]
        fn prop_distance_bounded_by_longer(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            let d = distance(&a, &b);
            let la = a.chars().count();
            let lb = b.chars().count();
            prop_assert!(d <= la.max(lb));
            prop_assert!(d >= la.abs_diff(lb));
        }

        #[test]
        fn prop_triangle(a in "[ab]{0,8}", b in "[ab]{0,8}", c in "[ab]{0,8}") {
            prop_assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));
        }
    }
}
