//! The `quizmark recap` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizmark_report::html::write_html_report;
use quizmark_report::recap::write_json_report;
use quizmark_report::text::generate_text;
use quizmark_report::SessionRecap;

use super::{open_engine, GlobalArgs};
use crate::OutputFormat;

pub fn execute(
    global: &GlobalArgs,
    answers: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let engine = open_engine(global, answers)?;
    let recap = SessionRecap::build(engine.table(), engine.session());

    match (format, output) {
        (OutputFormat::Text, None) => print!("{}", generate_text(&recap)),
        (OutputFormat::Text, Some(path)) => {
            std::fs::write(&path, generate_text(&recap))
                .with_context(|| format!("failed to write recap: {}", path.display()))?;
            eprintln!("Recap written to {}", path.display());
        }
        (OutputFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&recap)?),
        (OutputFormat::Json, Some(path)) => {
            write_json_report(&recap, &path)?;
            eprintln!("Recap written to {}", path.display());
        }
        (OutputFormat::Html, Some(path)) => {
            write_html_report(&recap, &path)?;
            eprintln!("Recap written to {}", path.display());
        }
        (OutputFormat::Html, None) => anyhow::bail!("--output is required for html recaps"),
    }

    Ok(())
}
