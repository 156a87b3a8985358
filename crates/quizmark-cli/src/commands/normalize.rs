//! The `quizmark normalize` command.

use anyhow::Result;

use quizmark_core::diff::highlight_differences;
use quizmark_core::evaluator::{evaluate_with, Verdict};
use quizmark_core::normalize::normalize;
use quizmark_report::text::render_diff;

use super::GlobalArgs;

pub fn execute(global: &GlobalArgs, text: String, expected: Option<String>) -> Result<()> {
    let Some(expected) = expected else {
        println!("{}", normalize(&text));
        return Ok(());
    };

    let config = global.load_config()?;
    let eval = evaluate_with(&text, &expected, &config.matching);

    println!("answer:   {}", eval.user_normalized);
    println!("expected: {}", eval.expected_normalized);
    let verdict = match eval.verdict {
        Verdict::Exact => "exact".to_string(),
        Verdict::Tolerated => format!(
            "accepted with typos: {}",
            render_diff(&highlight_differences(
                &eval.user_normalized,
                &eval.expected_normalized
            ))
        ),
        Verdict::Incorrect => "incorrect".to_string(),
    };
    println!("verdict:  {verdict}");

    Ok(())
}
