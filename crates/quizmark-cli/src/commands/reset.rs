//! The `quizmark reset` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{open_engine_or_empty, GlobalArgs};

pub fn execute(global: &GlobalArgs, answers: Option<PathBuf>) -> Result<()> {
    let mut engine = open_engine_or_empty(global, answers)?;
    engine.start_new_session();
    println!(
        "Started a new session ({}).",
        engine.session().meta().id
    );
    Ok(())
}
