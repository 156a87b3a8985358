//! The `quizmark go` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::model::ExerciseId;
use quizmark_core::session::Position;

use super::{open_engine, GlobalArgs};

pub fn execute(global: &GlobalArgs, answers: Option<PathBuf>, target: String) -> Result<()> {
    let mut engine = open_engine(global, answers)?;

    let position = match target.as_str() {
        "next" => engine.next(),
        "previous" | "prev" => engine.previous(),
        "final" | "finish" => {
            let summary = engine.show_final();
            println!(
                "Final score: {}/{} ({}%)",
                summary.score, summary.total_graded, summary.percentage
            );
            println!("{} {}", summary.tier.emoji(), summary.tier.message());
            return Ok(());
        }
        n => {
            let n: u32 = n
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown target {n:?}; expected a number, next, previous or final"))?;
            if !engine.go_to(ExerciseId(n)) {
                anyhow::bail!("answer table has no exercise {n}");
            }
            engine.session().position()
        }
    };

    match position {
        Position::Exercise(ex) => {
            let questions = engine.reveal_answers(ex).map_or(0, <[String]>::len);
            println!("Exercise {ex} ({questions} questions)");
        }
        Position::Final => println!("On the final screen."),
    }

    Ok(())
}
