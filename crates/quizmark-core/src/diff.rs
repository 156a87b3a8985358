//! Character-level differences between a normalized answer and the
//! expected form, for highlighting near misses that were still accepted.

use serde::{Deserialize, Serialize};

/// A run of characters in the learner's word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    /// Characters identical to the expected word at the same position.
    Same(String),
    /// A character that differs. Empty when the learner's word is shorter.
    Changed(String),
}

/// One word of the learner's answer, split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiff {
    pub segments: Vec<Segment>,
}

impl WordDiff {
    pub fn is_unchanged(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Same(_)))
    }
}

/// Align words by position and compare each pair character by character.
///
/// Missing words on either side are treated as empty.
pub fn highlight_differences(user_normalized: &str, expected_normalized: &str) -> Vec<WordDiff> {
    let user_words: Vec<&str> = user_normalized.split_whitespace().collect();
    let expected_words: Vec<&str> = expected_normalized.split_whitespace().collect();
    let len = user_words.len().max(expected_words.len());

    (0..len)
        .map(|i| {
            let user = user_words.get(i).copied().unwrap_or("");
            let expected = expected_words.get(i).copied().unwrap_or("");
            diff_word(user, expected)
        })
        .collect()
}

fn diff_word(user: &str, expected: &str) -> WordDiff {
    if user == expected {
        return WordDiff {
            segments: vec![Segment::Same(user.to_string())],
        };
    }

    let user_chars: Vec<char> = user.chars().collect();
    let expected_chars: Vec<char> = expected.chars().collect();
    let len = user_chars.len().max(expected_chars.len());

    let mut segments: Vec<Segment> = Vec::new();
    for j in 0..len {
        let uc = user_chars.get(j);
        let ec = expected_chars.get(j);
        if uc.is_some() && uc == ec {
            match segments.last_mut() {
                Some(Segment::Same(run)) => run.extend(uc),
                _ => segments.push(Segment::Same(uc.map(char::to_string).unwrap_or_default())),
            }
        } else {
            segments.push(Segment::Changed(
                uc.map(char::to_string).unwrap_or_default(),
            ));
        }
    }

    WordDiff { segments }
}
