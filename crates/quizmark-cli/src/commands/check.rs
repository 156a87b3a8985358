//! The `quizmark check` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::model::ExerciseId;

use super::{open_engine, GlobalArgs};
use crate::presenter::TerminalPresenter;
use crate::OutputFormat;

pub fn execute(
    global: &GlobalArgs,
    answers: Option<PathBuf>,
    exercise: Option<u32>,
    values: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut engine = open_engine(global, answers)?;

    let exercise = match exercise {
        Some(n) => {
            let id = ExerciseId(n);
            if !engine.go_to(id) {
                anyhow::bail!("answer table has no exercise {n}");
            }
            id
        }
        None => engine.current_exercise().ok_or_else(|| {
            anyhow::anyhow!("session is on the final screen; pass --exercise or run `quizmark reset`")
        })?,
    };

    let expected = engine.reveal_answers(exercise).map_or(0, <[String]>::len);
    if values.len() > expected {
        anyhow::bail!(
            "exercise {exercise} has {expected} question(s) but {} answer(s) were given",
            values.len()
        );
    }

    let mut presenter = TerminalPresenter::new(exercise, expected, values);
    if format == OutputFormat::Json {
        presenter = presenter.quiet();
    } else {
        println!("Exercise {exercise}");
    }

    match engine.check_exercise(exercise, &mut presenter) {
        Some(outcome) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
        None => {
            if format == OutputFormat::Json {
                println!("null");
            } else {
                println!("Nothing to check: exercise {exercise} has no questions.");
            }
        }
    }

    Ok(())
}
