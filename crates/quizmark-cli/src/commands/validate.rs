//! The `quizmark validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(answers_path: PathBuf) -> Result<()> {
    let tables = if answers_path.is_dir() {
        quizmark_core::parser::load_answer_directory(&answers_path)?
    } else {
        vec![quizmark_core::parser::parse_answer_table(&answers_path)?]
    };

    let mut total_warnings = 0;

    for table in &tables {
        println!(
            "Answer table: {} ({} exercises, {} questions)",
            table.name,
            table.exercise_count(),
            table.question_count()
        );

        let warnings = quizmark_core::parser::validate_answer_table(table);
        for w in &warnings {
            let prefix = w
                .exercise
                .map(|id| format!("  [exercise {id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer tables valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
