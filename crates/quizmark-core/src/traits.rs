//! The presenter interface.
//!
//! The engine never touches a UI toolkit directly. Whatever shows the quiz
//! (a terminal, a web page, a test harness) implements [`Presenter`] and
//! the engine calls through it to collect answers and render results.

use serde::{Deserialize, Serialize};

use crate::evaluator::Evaluation;
use crate::ledger::ScoreState;
use crate::model::{CollectedAnswer, ExerciseId, QuestionId};
use crate::progress::Progress;

/// Status of one question after a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Blank text or no option selected. Not graded.
    Unanswered,
    Incorrect,
    /// Carries the normalized forms for near-miss highlighting.
    Correct(Evaluation),
}

impl QuestionStatus {
    pub fn is_correct(&self) -> bool {
        matches!(self, QuestionStatus::Correct(_))
    }
}

/// Summary message for a whole exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseFeedback {
    PleaseAnswerAll,
    AllCorrect,
    SomeIncorrect,
}

impl ExerciseFeedback {
    pub fn message(self) -> &'static str {
        match self {
            ExerciseFeedback::PleaseAnswerAll => "Please answer all questions",
            ExerciseFeedback::AllCorrect => "All answers correct!",
            ExerciseFeedback::SomeIncorrect => "Some answers are incorrect",
        }
    }
}

/// A view the quiz engine renders into.
pub trait Presenter {
    /// The learner's current input for a question, or `None` when the view
    /// has no input for it. Questions without an input are skipped.
    fn collect_answer(&self, question: &QuestionId) -> Option<CollectedAnswer>;

    fn render_status(&mut self, question: &QuestionId, status: &QuestionStatus);

    fn render_score(&mut self, score: &ScoreState, progress: &Progress);

    fn render_feedback(&mut self, exercise: ExerciseId, feedback: ExerciseFeedback);
}
