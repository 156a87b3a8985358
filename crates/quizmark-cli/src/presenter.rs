//! Terminal rendering of check results.

use std::collections::BTreeMap;

use quizmark_core::diff::highlight_differences;
use quizmark_core::evaluator::Verdict;
use quizmark_core::ledger::ScoreState;
use quizmark_core::model::{CollectedAnswer, ExerciseId, QuestionId};
use quizmark_core::progress::Progress;
use quizmark_core::traits::{ExerciseFeedback, Presenter, QuestionStatus};
use quizmark_report::text::render_diff;

/// Presents to stdout. Answers come from the command line.
pub struct TerminalPresenter {
    answers: BTreeMap<QuestionId, CollectedAnswer>,
    quiet: bool,
}

impl TerminalPresenter {
    /// Map answers onto the `questions` of `exercise` in order. Questions
    /// past the last value get a blank input.
    pub fn new(exercise: ExerciseId, questions: usize, values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let answers = (0..questions.max(values.len()))
            .map(|i| {
                let value = values.next().unwrap_or_default();
                (QuestionId::new(exercise, i), CollectedAnswer::Text(value))
            })
            .collect();
        Self {
            answers,
            quiet: false,
        }
    }

    /// A presenter with no inputs, for re-rendering saved statuses.
    pub fn empty() -> Self {
        Self {
            answers: BTreeMap::new(),
            quiet: false,
        }
    }

    /// Collect answers but print nothing.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl Presenter for TerminalPresenter {
    fn collect_answer(&self, question: &QuestionId) -> Option<CollectedAnswer> {
        self.answers.get(question).cloned()
    }

    fn render_status(&mut self, question: &QuestionId, status: &QuestionStatus) {
        if self.quiet {
            return;
        }
        match status {
            QuestionStatus::Unanswered => println!("  ? {question}  unanswered"),
            QuestionStatus::Incorrect => println!("  ✗ {question}  incorrect"),
            QuestionStatus::Correct(eval) if eval.verdict == Verdict::Tolerated => {
                let diff = highlight_differences(&eval.user_normalized, &eval.expected_normalized);
                println!(
                    "  ✓ {question}  {}  (expected: {})",
                    render_diff(&diff),
                    eval.expected_normalized
                );
            }
            QuestionStatus::Correct(_) => println!("  ✓ {question}  correct"),
        }
    }

    fn render_score(&mut self, score: &ScoreState, progress: &Progress) {
        if self.quiet {
            return;
        }
        println!(
            "Score: {}/{} ({:.0}%)",
            score.score, score.total_graded, progress.percent
        );
    }

    fn render_feedback(&mut self, _exercise: ExerciseId, feedback: ExerciseFeedback) {
        if self.quiet {
            return;
        }
        println!("{}", feedback.message());
    }
}
