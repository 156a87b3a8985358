//! Plain-text recap.

use std::fmt::Write;

use quizmark_core::diff::{Segment, WordDiff};

use crate::recap::{RecapStatus, SessionRecap};

/// Render a diff with changed characters wrapped in brackets,
/// e.g. `beautiful[l] weather`.
pub fn render_diff(diff: &[WordDiff]) -> String {
    diff.iter()
        .map(|word| {
            word.segments
                .iter()
                .map(|segment| match segment {
                    Segment::Same(text) => text.clone(),
                    Segment::Changed(text) if text.is_empty() => "[_]".to_string(),
                    Segment::Changed(text) => format!("[{text}]"),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_text(recap: &SessionRecap) -> String {
    let mut out = String::new();
    let summary = &recap.summary;

    let _ = writeln!(out, "{} ({})", recap.quiz_name, recap.quiz_id);
    let _ = writeln!(
        out,
        "Score: {}/{} ({}%)",
        summary.score, summary.total_graded, summary.percentage
    );
    let _ = writeln!(out, "{} {}", summary.tier.emoji(), summary.tier.message());

    for exercise in &recap.exercises {
        out.push('\n');
        if exercise.title.is_empty() {
            let _ = writeln!(out, "Exercise {} ({}/{})", exercise.id, exercise.correct, exercise.graded);
        } else {
            let _ = writeln!(
                out,
                "Exercise {}: {} ({}/{})",
                exercise.id, exercise.title, exercise.correct, exercise.graded
            );
        }

        for q in &exercise.questions {
            let mark = match q.status {
                RecapStatus::Correct => "✓",
                RecapStatus::Incorrect => "✗",
                RecapStatus::NotGraded => "·",
            };
            let answer = match (&q.answer, q.diff.is_empty()) {
                (None, _) => String::from("(no answer)"),
                (Some(answer), true) => answer.clone(),
                (Some(_), false) => render_diff(&q.diff),
            };
            let _ = writeln!(out, "  {mark} {}  {answer}", q.id);
            if q.status == RecapStatus::Incorrect {
                let _ = writeln!(out, "      expected: {}", q.expected);
            }
        }
    }

    out
}
