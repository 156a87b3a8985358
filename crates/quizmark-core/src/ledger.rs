//! The score ledger.
//!
//! Remembers the last grading outcome of every question so that grading
//! the same question again only moves the score by the net change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Last-known correctness per question.
pub type AnsweredRecord = BTreeMap<QuestionId, bool>;

/// Running score. `score <= total_graded` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreState {
    pub score: u32,
    pub total_graded: u32,
}

/// Where a question stands in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeState {
    Unseen,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    record: AnsweredRecord,
    state: ScoreState,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted parts.
    ///
    /// The record is authoritative: if the persisted score disagrees with
    /// it, the score is recomputed from the record.
    pub fn from_parts(record: AnsweredRecord, state: ScoreState) -> Self {
        let derived = Self::derive_state(&record);
        if derived != state {
            tracing::warn!(
                persisted_score = state.score,
                persisted_total = state.total_graded,
                score = derived.score,
                total = derived.total_graded,
                "persisted score disagrees with answered record, using the record"
            );
        }
        Self {
            record,
            state: derived,
        }
    }

    /// Rebuild a ledger from a persisted record alone.
    pub fn from_record(record: AnsweredRecord) -> Self {
        let state = Self::derive_state(&record);
        Self { record, state }
    }

    fn derive_state(record: &AnsweredRecord) -> ScoreState {
        ScoreState {
            score: record.values().filter(|&&correct| correct).count() as u32,
            total_graded: record.len() as u32,
        }
    }

    /// Record a grading outcome and return the change to the score.
    pub fn grade(&mut self, question: &QuestionId, is_correct: bool) -> i32 {
        let previous = self.record.insert(question.clone(), is_correct);

        let delta = match (previous, is_correct) {
            (None, true) => 1,
            (None, false) => 0,
            (Some(true), true) | (Some(false), false) => 0,
            (Some(true), false) => -1,
            (Some(false), true) => 1,
        };

        if previous.is_none() {
            self.state.total_graded += 1;
        }
        self.state.score = self.state.score.saturating_add_signed(delta);

        tracing::debug!(
            question = %question,
            is_correct,
            delta,
            score = self.state.score,
            total = self.state.total_graded,
            "graded question"
        );

        delta
    }

    pub fn status(&self, question: &QuestionId) -> GradeState {
        match self.record.get(question) {
            None => GradeState::Unseen,
            Some(true) => GradeState::Correct,
            Some(false) => GradeState::Incorrect,
        }
    }

    pub fn score_state(&self) -> ScoreState {
        self.state
    }

    pub fn record(&self) -> &AnsweredRecord {
        &self.record
    }

    pub fn reset(&mut self) {
        self.record.clear();
        self.state = ScoreState::default();
    }
}
