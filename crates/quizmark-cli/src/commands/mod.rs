pub mod answers;
pub mod check;
pub mod go;
pub mod init;
pub mod normalize;
pub mod recap;
pub mod reset;
pub mod status;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizmark_core::config::{load_config_from, QuizConfig};
use quizmark_core::model::AnswerTable;
use quizmark_core::parser::parse_answer_table;
use quizmark_core::store::FileStore;
use quizmark_core::QuizEngine;

/// Flags shared by every command.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub session: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> Result<QuizConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(session) = &self.session {
            config.session_path = session.clone();
        }
        Ok(config)
    }
}

/// Pick the answer table from the flag, falling back to the config.
fn answers_path(config: &QuizConfig, answers: Option<PathBuf>) -> Result<PathBuf> {
    answers
        .or_else(|| config.answers.clone())
        .context("no answer table given; pass --answers or set `answers` in quizmark.toml")
}

fn load_table(path: &Path) -> Result<AnswerTable> {
    if path.is_dir() {
        anyhow::bail!(
            "{} is a directory; pass a single answer table file",
            path.display()
        );
    }
    Ok(parse_answer_table(path)?)
}

/// Open the engine over the configured session file.
pub fn open_engine(
    global: &GlobalArgs,
    answers: Option<PathBuf>,
) -> Result<QuizEngine<FileStore>> {
    let config = global.load_config()?;
    let table = load_table(&answers_path(&config, answers)?)?;
    open_engine_with(&config, table)
}

/// Open the engine, tolerating a missing answer table.
pub fn open_engine_or_empty(
    global: &GlobalArgs,
    answers: Option<PathBuf>,
) -> Result<QuizEngine<FileStore>> {
    let config = global.load_config()?;
    let table = match answers.or_else(|| config.answers.clone()) {
        Some(path) => load_table(&path)?,
        None => AnswerTable::default(),
    };
    open_engine_with(&config, table)
}

fn open_engine_with(config: &QuizConfig, table: AnswerTable) -> Result<QuizEngine<FileStore>> {
    let store = FileStore::open_or_recover(&config.session_path).with_context(|| {
        format!(
            "failed to open session store: {}",
            config.session_path.display()
        )
    })?;
    tracing::debug!(
        quiz = %table.id,
        session = %config.session_path.display(),
        "opening engine"
    );
    Ok(QuizEngine::new(table, store, config.engine_config()))
}
