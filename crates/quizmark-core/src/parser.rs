//! TOML answer table parser.
//!
//! Loads expected-answer tables from TOML files and directories, and
//! validates them.
//!
//! ```toml
//! [quiz]
//! id = "unit-3"
//! name = "Unit 3: present simple"
//!
//! [[exercises]]
//! id = 1
//! title = "Be"
//! answers = ["I am a student", "she is not here"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::TableError;
use crate::model::{AnswerTable, Exercise, ExerciseId};
use crate::normalize::normalize;

/// Intermediate TOML structure for parsing answer table files.
#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    exercises: Vec<TomlExercise>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlExercise {
    id: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    answers: Vec<String>,
}

/// Parse a single TOML file into an `AnswerTable`.
pub fn parse_answer_table(path: &Path) -> Result<AnswerTable, TableError> {
    let content = std::fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_answer_table_str(&content, path)
}

/// Parse a TOML string into an `AnswerTable` (useful for testing).
pub fn parse_answer_table_str(
    content: &str,
    source_path: &Path,
) -> Result<AnswerTable, TableError> {
    let parsed: TomlAnswerFile = toml::from_str(content).map_err(|source| TableError::Parse {
        path: source_path.to_path_buf(),
        source,
    })?;

    let invalid = |message: String| TableError::Invalid {
        path: source_path.to_path_buf(),
        message,
    };

    let mut exercises = BTreeMap::new();
    for ex in parsed.exercises {
        if ex.id == 0 {
            return Err(invalid("exercise ids start at 1".into()));
        }
        let id = ExerciseId(ex.id);
        let exercise = Exercise {
            id,
            title: ex.title,
            answers: ex.answers,
        };
        if exercises.insert(id, exercise).is_some() {
            return Err(invalid(format!("duplicate exercise id: {id}")));
        }
    }

    Ok(AnswerTable {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        exercises,
    })
}

/// Recursively load all `.toml` answer tables from a directory.
pub fn load_answer_directory(dir: &Path) -> Result<Vec<AnswerTable>> {
    let mut tables = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            tables.extend(load_answer_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_answer_table(&path) {
                Ok(table) => tables.push(table),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    tables.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(tables)
}

/// A warning from answer table validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise (if applicable).
    pub exercise: Option<ExerciseId>,
    /// Warning message.
    pub message: String,
}

/// Validate an answer table for common issues.
pub fn validate_answer_table(table: &AnswerTable) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if table.exercises.is_empty() {
        warnings.push(ValidationWarning {
            exercise: None,
            message: "table has no exercises".into(),
        });
    }

    let mut expected_next = table.first_exercise().map(|ex| ex.0);
    for (id, exercise) in &table.exercises {
        // Navigation steps over missing numbers, but a gap is usually a typo.
        if let Some(next) = expected_next {
            if id.0 != next {
                warnings.push(ValidationWarning {
                    exercise: Some(*id),
                    message: format!("exercise numbering skips from {} to {}", next - 1, id),
                });
            }
        }
        expected_next = Some(id.0 + 1);

        if exercise.answers.is_empty() {
            warnings.push(ValidationWarning {
                exercise: Some(*id),
                message: "exercise has no answers".into(),
            });
        }

        for (question, answer) in exercise.questions() {
            if answer.trim().is_empty() {
                warnings.push(ValidationWarning {
                    exercise: Some(*id),
                    message: format!("{question}: answer is blank"),
                });
            } else if normalize(answer).is_empty() {
                warnings.push(ValidationWarning {
                    exercise: Some(*id),
                    message: format!(
                        "{question}: answer {answer:?} normalizes to nothing and can never be matched"
                    ),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
id = "unit-3"
name = "Unit 3"
description = "Present simple of be"

[[exercises]]
id = 1
title = "Affirmative"
answers = ["I am a student", "you are late"]

[[exercises]]
id = 2
answers = ["she isn't here"]
"#;

    #[test]
    fn parse_valid_toml() {
        let table = parse_answer_table_str(VALID_TOML, &PathBuf::from("unit3.toml")).unwrap();
        assert_eq!(table.id, "unit-3");
        assert_eq!(table.name, "Unit 3");
        assert_eq!(table.exercise_count(), 2);
        assert_eq!(table.question_count(), 3);
        assert_eq!(table.exercise(ExerciseId(1)).unwrap().title, "Affirmative");
        assert_eq!(
            table.expected(&QuestionId::new(ExerciseId(2), 0)),
            Some("she isn't here")
        );
        assert!(validate_answer_table(&table).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[quiz]
id = "minimal"
name = "Minimal"
"#;
        let table = parse_answer_table_str(toml, &PathBuf::from("min.toml")).unwrap();
        assert!(table.description.is_empty());
        assert!(table.exercises.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let toml = r#"
[quiz]
id = "dupes"
name = "Dupes"

[[exercises]]
id = 1
answers = ["a"]

[[exercises]]
id = 1
answers = ["b"]
"#;
        let err = parse_answer_table_str(toml, &PathBuf::from("d.toml")).unwrap_err();
        assert!(matches!(err, TableError::Invalid { .. }));
        assert!(err.to_string().contains("duplicate exercise id: 1"));
    }

    #[test]
    fn zero_id_is_rejected() {
        let toml = r#"
[quiz]
id = "zero"
name = "Zero"

[[exercises]]
id = 0
answers = ["a"]
"#;
        assert!(parse_answer_table_str(toml, &PathBuf::from("z.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let err = parse_answer_table_str(bad, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn validate_flags_problems() {
        let toml = r#"
[quiz]
id = "messy"
name = "Messy"

[[exercises]]
id = 1
answers = []

[[exercises]]
id = 3
answers = ["ok", "  ", "?!"]
"#;
        let table = parse_answer_table_str(toml, &PathBuf::from("m.toml")).unwrap();
        let warnings = validate_answer_table(&table);
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();

        assert!(messages.iter().any(|m| m.contains("no answers")));
        assert!(messages.iter().any(|m| m.contains("skips from 1 to 3")));
        assert!(messages.iter().any(|m| m.contains("q3-2: answer is blank")));
        assert!(messages.iter().any(|m| m.contains("q3-3") && m.contains("normalizes to nothing")));
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn validate_empty_table() {
        let table = AnswerTable::default();
        let warnings = validate_answer_table(&table);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].exercise.is_none());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("unit3.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("nested").join("unit1.toml"),
            "[quiz]\nid = \"unit-1\"\nname = \"Unit 1\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let tables = load_answer_directory(dir.path()).unwrap();
        let ids: Vec<_> = tables.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["unit-1", "unit-3"]);
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("unit.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_answer_directory(&file).is_err());
    }
}
