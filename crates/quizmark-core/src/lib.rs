//! quizmark-core: answer matching, score ledger, and session persistence.
//!
//! This crate grades free-text quiz answers against an expected-answer
//! table, tolerating contractions, punctuation and small typos, and keeps
//! an idempotent score across repeated checks and restarts.

pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod ledger;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod progress;
pub mod session;
pub mod similarity;
pub mod store;
pub mod traits;

pub use engine::{CheckOutcome, QuizEngine, QuizEngineConfig};
pub use evaluator::{evaluate, evaluate_with, is_correct, Evaluation, Verdict};
pub use normalize::normalize;
pub use similarity::{distance, MatchPolicy};
