//! Progress and final-screen summaries derived from the score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ledger::ScoreState;

/// Share of graded questions answered correctly, capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u32,
    pub total_graded: u32,
    pub percent: f64,
}

impl From<ScoreState> for Progress {
    fn from(state: ScoreState) -> Self {
        let percent = if state.total_graded == 0 {
            0.0
        } else {
            (state.score as f64 / state.total_graded as f64 * 100.0).min(100.0)
        };
        Self {
            score: state.score,
            total_graded: state.total_graded,
            percent,
        }
    }
}

/// Encouragement band shown on the final screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Outstanding,
    Great,
    Good,
    KeepPracticing,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Tier::Outstanding,
            75..=89 => Tier::Great,
            60..=74 => Tier::Good,
            _ => Tier::KeepPracticing,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Tier::Outstanding => "🏆",
            Tier::Great => "🌟",
            Tier::Good => "👍",
            Tier::KeepPracticing => "💪",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Outstanding => "Outstanding! You're completely ready for your test!",
            Tier::Great => "Great job! Just review a few points and you'll ace it!",
            Tier::Good => "Good effort! Keep practicing those tricky parts.",
            Tier::KeepPracticing => "Don't give up! Review the lesson and try again.",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Outstanding => write!(f, "outstanding"),
            Tier::Great => write!(f, "great"),
            Tier::Good => write!(f, "good"),
            Tier::KeepPracticing => write!(f, "keep practicing"),
        }
    }
}

/// What the final screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub score: u32,
    pub total_graded: u32,
    /// Rounded percentage; 0 when nothing was graded.
    pub percentage: u32,
    pub tier: Tier,
}

impl From<ScoreState> for FinalSummary {
    fn from(state: ScoreState) -> Self {
        let percentage =
            (state.score as f64 / state.total_graded.max(1) as f64 * 100.0).round() as u32;
        Self {
            score: state.score,
            total_graded: state.total_graded,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }
}
