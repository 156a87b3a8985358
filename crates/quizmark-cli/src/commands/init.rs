//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizmark.toml
    if std::path::Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    // Create example answer table
    std::fs::create_dir_all("answers")?;
    let example_path = std::path::Path::new("answers/example.toml");
    if example_path.exists() {
        println!("answers/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TABLE)?;
        println!("Created answers/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizmark validate --answers answers/example.toml");
    println!("  2. Run: quizmark check --exercise 1 -a \"I'm a student\" -a \"she isn't here\"");
    println!("  3. Run: quizmark status");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

answers = "answers/example.toml"
session_path = ".quizmark/session.json"

# Prefix for session keys when several quizzes share one session file.
key_prefix = ""

[matching]
# Expected words at least this long may contain typos.
long_word_min_len = 5
long_word_tolerance = 1
"#;

const EXAMPLE_TABLE: &str = r#"[quiz]
id = "example"
name = "Example quiz"
description = "Present simple of 'to be'"

[[exercises]]
id = 1
title = "Affirmative and negative"
answers = [
    "I am a student",
    "she is not here",
    "they are beautiful",
]

[[exercises]]
id = 2
title = "Questions"
answers = [
    "are you ready",
    "is it raining",
]
"#;
