//! The `quizmark answers` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::model::ExerciseId;

use super::{open_engine, GlobalArgs};

pub fn execute(global: &GlobalArgs, answers: Option<PathBuf>, exercise: u32) -> Result<()> {
    let engine = open_engine(global, answers)?;
    let Some(expected) = engine.reveal_answers(ExerciseId(exercise)) else {
        anyhow::bail!("answer table has no exercise {exercise}");
    };

    println!("Exercise {exercise} answers:");
    for (i, answer) in expected.iter().enumerate() {
        println!("  {}. {answer}", i + 1);
    }

    Ok(())
}
