//! A serializable snapshot of one session against its answer table.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizmark_core::diff::{highlight_differences, WordDiff};
use quizmark_core::ledger::{GradeState, ScoreState};
use quizmark_core::model::{AnswerTable, ExerciseId, QuestionId};
use quizmark_core::normalize::normalize;
use quizmark_core::progress::{FinalSummary, Progress};
use quizmark_core::session::{Position, Session};

/// Recap of a whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecap {
    pub quiz_id: String,
    pub quiz_name: String,
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub position: Position,
    pub score: ScoreState,
    pub progress: Progress,
    pub summary: FinalSummary,
    pub exercises: Vec<ExerciseRecap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecap {
    pub id: ExerciseId,
    pub title: String,
    pub correct: u32,
    pub graded: u32,
    pub questions: Vec<QuestionRecap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecap {
    pub id: QuestionId,
    pub expected: String,
    /// Last value the learner entered, if any.
    pub answer: Option<String>,
    pub status: RecapStatus,
    /// Highlighting of the learner's answer, present when the normalized
    /// forms differ.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Vec<WordDiff>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecapStatus {
    NotGraded,
    Correct,
    Incorrect,
}

impl RecapStatus {
    pub fn label(self) -> &'static str {
        match self {
            RecapStatus::NotGraded => "-",
            RecapStatus::Correct => "correct",
            RecapStatus::Incorrect => "incorrect",
        }
    }
}

impl From<GradeState> for RecapStatus {
    fn from(state: GradeState) -> Self {
        match state {
            GradeState::Unseen => RecapStatus::NotGraded,
            GradeState::Correct => RecapStatus::Correct,
            GradeState::Incorrect => RecapStatus::Incorrect,
        }
    }
}

impl SessionRecap {
    pub fn build(table: &AnswerTable, session: &Session) -> Self {
        let ledger = session.ledger();

        let exercises = table
            .exercises
            .values()
            .map(|exercise| {
                let questions: Vec<QuestionRecap> = exercise
                    .questions()
                    .map(|(id, expected)| {
                        let answer = session
                            .draft(&id)
                            .filter(|a| !a.trim().is_empty())
                            .map(str::to_string);
                        let status = RecapStatus::from(ledger.status(&id));
                        let diff = match (&answer, status) {
                            (Some(answer), RecapStatus::Correct | RecapStatus::Incorrect) => {
                                let user = normalize(answer);
                                let expected = normalize(expected);
                                if user == expected {
                                    Vec::new()
                                } else {
                                    highlight_differences(&user, &expected)
                                }
                            }
                            _ => Vec::new(),
                        };
                        QuestionRecap {
                            id,
                            expected: expected.to_string(),
                            answer,
                            status,
                            diff,
                        }
                    })
                    .collect();

                let count = |s: RecapStatus| questions.iter().filter(|q| q.status == s).count() as u32;
                let correct = count(RecapStatus::Correct);
                let graded = correct + count(RecapStatus::Incorrect);

                ExerciseRecap {
                    id: exercise.id,
                    title: exercise.title.clone(),
                    correct,
                    graded,
                    questions,
                }
            })
            .collect();

        let score = session.score_state();
        Self {
            quiz_id: table.id.clone(),
            quiz_name: table.name.clone(),
            session_id: session.meta().id,
            started_at: session.meta().started_at,
            updated_at: session.meta().updated_at,
            generated_at: Utc::now(),
            position: session.position(),
            score,
            progress: Progress::from(score),
            summary: FinalSummary::from(score),
            exercises,
        }
    }
}

/// Write a recap as pretty-printed JSON.
pub fn write_json_report(recap: &SessionRecap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(recap).context("failed to serialize recap")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write recap: {}", path.display()))?;
    Ok(())
}
