//! Central quiz engine.
//!
//! Ties the answer table, evaluator, score ledger and session store
//! together behind the operations a quiz view triggers: check an exercise,
//! keep a draft, move between exercises, finish, start over.

use serde::{Deserialize, Serialize};

use crate::evaluator::evaluate_with;
use crate::ledger::ScoreState;
use crate::model::{AnswerTable, ExerciseId, QuestionId};
use crate::progress::{FinalSummary, Progress};
use crate::session::{Position, Session, SessionKeys};
use crate::similarity::MatchPolicy;
use crate::store::SessionStore;
use crate::traits::{ExerciseFeedback, Presenter, QuestionStatus};

/// Configuration for the quiz engine.
#[derive(Debug, Clone, Default)]
pub struct QuizEngineConfig {
    /// Typo tolerance used when grading.
    pub policy: MatchPolicy,
    /// Keys under which the session is persisted.
    pub keys: SessionKeys,
}

/// Result of checking one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub exercise: ExerciseId,
    /// Net change to the score caused by this check.
    pub score_delta: i32,
    /// Status of every question that had an input, in question order.
    pub statuses: Vec<(QuestionId, QuestionStatus)>,
    pub feedback: ExerciseFeedback,
    /// Score after the check.
    pub score: ScoreState,
}

pub struct QuizEngine<S: SessionStore> {
    table: AnswerTable,
    store: S,
    session: Session,
    config: QuizEngineConfig,
}

impl<S: SessionStore> QuizEngine<S> {
    /// Create an engine, rehydrating any session already in `store`.
    pub fn new(table: AnswerTable, store: S, config: QuizEngineConfig) -> Self {
        let mut session = Session::load(&store, &config.keys);

        if let Position::Exercise(ex) = session.position() {
            if table.exercise(ex).is_none() {
                if let Some(first) = table.first_exercise() {
                    tracing::debug!(%ex, %first, "saved exercise not in table, starting at first");
                    session.set_position(Position::Exercise(first));
                }
            }
        }

        Self {
            table,
            store,
            session,
            config,
        }
    }

    /// Grade every answered question of `exercise`.
    ///
    /// Returns `None` without touching the session when the table has no
    /// such exercise or the presenter has no input for any of its questions.
    pub fn check_exercise(
        &mut self,
        exercise: ExerciseId,
        presenter: &mut dyn Presenter,
    ) -> Option<CheckOutcome> {
        let Some(entry) = self.table.exercise(exercise) else {
            tracing::debug!(%exercise, "no expected answers for exercise, skipping check");
            return None;
        };

        let mut score_delta = 0;
        let mut statuses = Vec::with_capacity(entry.answers.len());
        let mut has_unanswered = false;

        for (question, expected) in entry.questions() {
            let Some(collected) = presenter.collect_answer(&question) else {
                tracing::debug!(%question, "no input for question, skipping");
                continue;
            };
            self.session
                .set_draft(question.clone(), collected.raw_value());

            let status = match collected.answered_value() {
                None => {
                    has_unanswered = true;
                    QuestionStatus::Unanswered
                }
                Some(value) => {
                    let evaluation = evaluate_with(value, expected, &self.config.policy);
                    let correct = evaluation.is_correct();
                    score_delta += self.session.ledger_mut().grade(&question, correct);
                    if correct {
                        QuestionStatus::Correct(evaluation)
                    } else {
                        QuestionStatus::Incorrect
                    }
                }
            };

            presenter.render_status(&question, &status);
            statuses.push((question, status));
        }

        if statuses.is_empty() {
            tracing::debug!(%exercise, "exercise has no inputs, nothing to check");
            return None;
        }

        let feedback = if has_unanswered {
            ExerciseFeedback::PleaseAnswerAll
        } else if statuses.iter().all(|(_, s)| s.is_correct()) {
            ExerciseFeedback::AllCorrect
        } else {
            ExerciseFeedback::SomeIncorrect
        };

        let score = self.session.score_state();
        presenter.render_score(&score, &Progress::from(score));
        presenter.render_feedback(exercise, feedback);
        self.save();

        tracing::info!(
            %exercise,
            score_delta,
            score = score.score,
            total = score.total_graded,
            ?feedback,
            "checked exercise"
        );

        Some(CheckOutcome {
            exercise,
            score_delta,
            statuses,
            feedback,
            score,
        })
    }

    /// Keep what the learner typed so far, without grading it.
    pub fn record_draft(&mut self, question: QuestionId, value: impl Into<String>) {
        self.session.set_draft(question, value);
        self.save();
    }

    /// Re-render the statuses of previously graded questions, e.g. after
    /// the session was loaded from the store.
    pub fn restore_statuses(&self, presenter: &mut dyn Presenter) {
        for (question, &correct) in self.session.ledger().record() {
            let Some(draft) = self.session.draft(question) else {
                continue;
            };
            if draft.trim().is_empty() {
                continue;
            }
            let Some(expected) = self.table.expected(question) else {
                continue;
            };
            let status = if correct {
                QuestionStatus::Correct(evaluate_with(draft, expected, &self.config.policy))
            } else {
                QuestionStatus::Incorrect
            };
            presenter.render_status(question, &status);
        }

        let score = self.session.score_state();
        presenter.render_score(&score, &Progress::from(score));
    }

    /// Move to `exercise`. Returns `false` if the table has no such exercise.
    pub fn go_to(&mut self, exercise: ExerciseId) -> bool {
        if self.table.exercise(exercise).is_none() {
            tracing::debug!(%exercise, "cannot navigate to unknown exercise");
            return false;
        }
        self.session.set_position(Position::Exercise(exercise));
        self.save();
        true
    }

    /// Move to the following exercise, staying put on the last one.
    pub fn next(&mut self) -> Position {
        if let Position::Exercise(current) = self.session.position() {
            let following = self
                .table
                .exercises
                .range(ExerciseId(current.0.saturating_add(1))..)
                .next()
                .map(|(id, _)| *id);
            if let Some(ex) = following {
                self.go_to(ex);
            }
        }
        self.session.position()
    }

    /// Move to the preceding exercise, staying put on the first one.
    pub fn previous(&mut self) -> Position {
        if let Position::Exercise(current) = self.session.position() {
            let preceding = self
                .table
                .exercises
                .range(..current)
                .next_back()
                .map(|(id, _)| *id);
            if let Some(ex) = preceding {
                self.go_to(ex);
            }
        }
        self.session.position()
    }

    /// Switch to the final screen.
    pub fn show_final(&mut self) -> FinalSummary {
        self.session.set_position(Position::Final);
        self.save();
        FinalSummary::from(self.session.score_state())
    }

    /// Discard the whole session and return to the first exercise.
    pub fn start_new_session(&mut self) {
        self.session.reset(&mut self.store, &self.config.keys);
        if let Some(first) = self.table.first_exercise() {
            self.session.set_position(Position::Exercise(first));
        }
        self.save();
    }

    /// Expected answers of an exercise, for the "show answers" panel.
    pub fn reveal_answers(&self, exercise: ExerciseId) -> Option<&[String]> {
        self.table.exercise(exercise).map(|e| e.answers.as_slice())
    }

    pub fn current_exercise(&self) -> Option<ExerciseId> {
        match self.session.position() {
            Position::Exercise(ex) => Some(ex),
            Position::Final => None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn table(&self) -> &AnswerTable {
        &self.table
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.config.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self) {
        self.session.save(&mut self.store, &self.config.keys);
    }
}
