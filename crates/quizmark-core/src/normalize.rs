//! Answer normalization.
//!
//! Turns a learner's raw answer into a canonical form that can be compared
//! against an expected answer: lowercase, single-spaced, with English
//! contractions expanded and sentence punctuation removed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apostrophe look-alikes that are folded into `'` before contraction rules run.
const APOSTROPHE_VARIANTS: &[char] = &['\u{2019}', '\u{2018}', '`', '\u{02BC}'];

/// Sentence punctuation stripped from the normalized form.
const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Contraction rules, applied in order.
///
/// Irregular negations must come before the general `n't` rule, which
/// would otherwise turn `can't` into `ca not` and `won't` into `wo not`.
const CONTRACTION_RULES: &[(&str, &str)] = &[
    (r"\bcan't\b", "cannot"),
    (r"\bwon't\b", "will not"),
    (r"\bshan't\b", "shall not"),
    (r"\b(\w*?)n't\b", "${1} not"),
    (r"\b(\w+)'d\b", "${1} would"),
    (r"\b(\w+)'ll\b", "${1} will"),
    (r"\b(\w+)'ve\b", "${1} have"),
    (r"\b(\w+)'re\b", "${1} are"),
    (r"\b(\w+)'m\b", "${1} am"),
    (r"\b(\w+)'s\b", "${1} is"),
];

struct ContractionRule {
    pattern: Regex,
    replacement: &'static str,
}

static CONTRACTIONS: Lazy<Vec<ContractionRule>> = Lazy::new(|| {
    CONTRACTION_RULES
        .iter()
        .map(|&(pattern, replacement)| ContractionRule {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect()
});

/// Normalize an answer for comparison.
///
/// Empty input yields an empty string. The pipeline is repeated until the
/// output no longer changes: stripping punctuation can join an apostrophe
/// to a word (`"it.'s"` → `"it's"`), and that contraction has to be
/// expanded too for the result to be a fixed point.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut current = normalize_once(text);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(text: &str) -> String {
    let lowered = collapse_whitespace(&text.to_lowercase());
    let unified: String = lowered
        .chars()
        .map(|c| if APOSTROPHE_VARIANTS.contains(&c) { '\'' } else { c })
        .collect();
    let expanded = expand_contractions(&unified);
    let stripped: String = expanded
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect();
    collapse_whitespace(&stripped)
}

/// Apply every contraction rule in order.
pub fn expand_contractions(text: &str) -> String {
    CONTRACTIONS
        .iter()
        .fold(text.to_string(), |acc, rule| {
            rule.pattern.replace_all(&acc, rule.replacement).into_owned()
        })
}

/// Trim and collapse runs of whitespace to a single space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_normalize_idempotent(text in ".{0,40}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_idempotent_on_english(text in "[A-Za-z' .,!?;:\u{2019}]{0,40}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_no_edge_or_double_spaces(text in "[a-z '\t\n.]{0,40}") {
            let n = normalize(&text);
            prop_assert!(!n.starts_with(' '));
            prop_assert!(!n.ends_with(' '));
            prop_assert!(!n.contains("  "));
        }
    }
}
