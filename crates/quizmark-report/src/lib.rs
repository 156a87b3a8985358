//! quizmark-report: recaps of a quiz session as text, HTML or JSON.

pub mod html;
pub mod recap;
pub mod text;

pub use recap::SessionRecap;
