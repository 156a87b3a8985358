//! Core data model types for quizmark.
//!
//! Exercises, question identifiers, the read-only answer table, and the
//! values a presenter hands back when it collects a learner's input.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A 1-based exercise number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(pub u32);

impl ExerciseId {
    /// The panel identifier used when persisting the active exercise.
    pub fn panel_id(self) -> String {
        format!("ex{}", self.0)
    }

    /// Parse a panel identifier such as `ex3`.
    pub fn from_panel_id(s: &str) -> Option<Self> {
        s.strip_prefix("ex")
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|&n| n >= 1)
            .map(ExerciseId)
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one gradable input: `q{exercise}-{position}`.
///
/// Positions are 1-based in the identifier while answer tables are
/// indexed from zero, so `QuestionId::new(ExerciseId(2), 0)` is `q2-1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(exercise: ExerciseId, index: usize) -> Self {
        Self(format!("q{}-{}", exercise.0, index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the exercise and zero-based question index, if the id is
    /// in the canonical `q{ex}-{n}` shape.
    pub fn parts(&self) -> Option<(ExerciseId, usize)> {
        let rest = self.0.strip_prefix('q')?;
        let (ex, pos) = rest.split_once('-')?;
        let ex = ex.parse::<u32>().ok().filter(|&n| n >= 1)?;
        let pos = pos.parse::<usize>().ok().filter(|&n| n >= 1)?;
        Some((ExerciseId(ex), pos - 1))
    }

    pub fn exercise(&self) -> Option<ExerciseId> {
        self.parts().map(|(ex, _)| ex)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QuestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = QuestionId(s.to_string());
        match id.parts() {
            Some(_) => Ok(id),
            None => Err(format!("invalid question id: {s}")),
        }
    }
}

/// What a presenter collected for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CollectedAnswer {
    /// Free text typed by the learner.
    Text(String),
    /// The value tag of the selected option, if any option is selected.
    Choice(Option<String>),
}

impl CollectedAnswer {
    /// The gradable value, or `None` when the question is unanswered.
    pub fn answered_value(&self) -> Option<&str> {
        match self {
            CollectedAnswer::Text(text) if !text.trim().is_empty() => Some(text),
            CollectedAnswer::Choice(Some(tag)) => Some(tag),
            _ => None,
        }
    }

    /// The raw value to keep as a draft, answered or not.
    pub fn raw_value(&self) -> &str {
        match self {
            CollectedAnswer::Text(text) => text,
            CollectedAnswer::Choice(tag) => tag.as_deref().unwrap_or(""),
        }
    }
}

/// One exercise: an ordered list of expected answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Expected answers in question order.
    pub answers: Vec<String>,
}

impl Exercise {
    /// Question ids paired with their expected answers.
    pub fn questions(&self) -> impl Iterator<Item = (QuestionId, &str)> + '_ {
        self.answers
            .iter()
            .enumerate()
            .map(move |(i, a)| (QuestionId::new(self.id, i), a.as_str()))
    }
}

/// The read-only expected-answer table for a quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerTable {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Exercises keyed by id.
    #[serde(default)]
    pub exercises: BTreeMap<ExerciseId, Exercise>,
}

impl AnswerTable {
    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.get(&id)
    }

    /// The expected answer for a question, if both exercise and position exist.
    pub fn expected(&self, question: &QuestionId) -> Option<&str> {
        let (ex, index) = question.parts()?;
        self.exercise(ex)?.answers.get(index).map(String::as_str)
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn question_count(&self) -> usize {
        self.exercises.values().map(|e| e.answers.len()).sum()
    }

    pub fn first_exercise(&self) -> Option<ExerciseId> {
        self.exercises.keys().next().copied()
    }

    pub fn last_exercise(&self) -> Option<ExerciseId> {
        self.exercises.keys().next_back().copied()
    }
}
