//! The `quizmark status` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizmark_core::progress::Progress;
use quizmark_core::session::Position;
use quizmark_report::SessionRecap;

use super::{open_engine, GlobalArgs};
use crate::presenter::TerminalPresenter;

pub fn execute(global: &GlobalArgs, answers: Option<PathBuf>) -> Result<()> {
    let engine = open_engine(global, answers)?;
    let recap = SessionRecap::build(engine.table(), engine.session());

    println!("{} ({})", recap.quiz_name, recap.quiz_id);
    match engine.session().position() {
        Position::Exercise(ex) => println!("Current exercise: {ex}"),
        Position::Final => println!("Current exercise: final screen"),
    }

    let mut table = Table::new();
    table.set_header(vec!["Exercise", "Title", "Questions", "Graded", "Correct"]);
    for exercise in &recap.exercises {
        table.add_row(vec![
            Cell::new(exercise.id),
            Cell::new(&exercise.title),
            Cell::new(exercise.questions.len()),
            Cell::new(exercise.graded),
            Cell::new(exercise.correct),
        ]);
    }
    println!("{table}");

    if engine.session().ledger().record().is_empty() {
        let score = engine.session().score_state();
        let progress = Progress::from(score);
        println!(
            "Score: {}/{} ({:.0}%)",
            score.score, score.total_graded, progress.percent
        );
    } else {
        println!("Graded questions:");
        engine.restore_statuses(&mut TerminalPresenter::empty());
    }

    Ok(())
}
