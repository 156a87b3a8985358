//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PRESENT: &str = "../../answer-tables/present-simple.toml";

fn quizmark() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizmark").unwrap();
    cmd.env_remove("QUIZMARK_SESSION");
    cmd
}

/// A command bound to a throwaway session file.
fn quizmark_in(session: &Path) -> Command {
    let mut cmd = quizmark();
    cmd.arg("--session").arg(session);
    cmd
}

fn session_file(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

#[test]
fn check_grades_answers() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["check", "--answers", PRESENT, "--exercise", "1"])
        .args(["-a", "I'm a student", "-a", "She isn't here.", "-a", "they is beautiful"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ q1-1  correct"))
        .stdout(predicate::str::contains("✓ q1-2  correct"))
        .stdout(predicate::str::contains("✗ q1-3  incorrect"))
        .stdout(predicate::str::contains("Score: 2/3 (67%)"))
        .stdout(predicate::str::contains("Some answers are incorrect"));

    assert!(session_file(&dir).exists());
}

#[test]
fn check_highlights_tolerated_typos() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["check", "--answers", PRESENT, "--exercise", "1"])
        .args(["-a", "I am a student", "-a", "she is not here", "-a", "they are beautifull"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beautiful[l]"))
        .stdout(predicate::str::contains("All answers correct!"));
}

#[test]
fn check_blank_answer_is_unanswered() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["check", "--answers", PRESENT, "--exercise", "2"])
        .args(["-a", "he doesn't like coffee", "-a", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("? q2-2  unanswered"))
        .stdout(predicate::str::contains("Score: 1/1 (100%)"))
        .stdout(predicate::str::contains("Please answer all questions"));
}

#[test]
fn check_missing_answers_are_unanswered() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["check", "--answers", PRESENT, "--exercise", "1"])
        .args(["-a", "I am a student"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ q1-1  correct"))
        .stdout(predicate::str::contains("? q1-2  unanswered"))
        .stdout(predicate::str::contains("? q1-3  unanswered"))
        .stdout(predicate::str::contains("Score: 1/1 (100%)"))
        .stdout(predicate::str::contains("Please answer all questions"))
        .stdout(predicate::str::contains("All answers correct!").not());
}

#[test]
fn rechecking_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let session = session_file(&dir);

    let run = || {
        let output = quizmark_in(&session)
            .args(["check", "--answers", PRESENT, "--exercise", "1", "--format", "json"])
            .args(["-a", "I am a student", "-a", "she is here"])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap()
    };

    let first = run();
    assert_eq!(first["score_delta"], 1);
    assert_eq!(first["score"]["score"], 1);
    assert_eq!(first["score"]["totalGraded"], 2);

    let second = run();
    assert_eq!(second["score_delta"], 0);
    assert_eq!(second["score"]["totalGraded"], 2);
    assert_eq!(second["feedback"], "some_incorrect");
}

#[test]
fn check_rejects_unknown_exercise() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["check", "--answers", PRESENT, "--exercise", "9", "-a", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no exercise 9"));
}

#[test]
fn check_rejects_too_many_answers() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["check", "--answers", PRESENT, "--exercise", "2"])
        .args(["-a", "a", "-a", "b", "-a", "c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 question(s)"));
}

#[test]
fn check_requires_answer_table() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .current_dir(dir.path())
        .args(["check", "--exercise", "1", "-a", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no answer table"));
}

#[test]
fn status_after_check() {
    let dir = TempDir::new().unwrap();
    let session = session_file(&dir);

    quizmark_in(&session)
        .args(["check", "--answers", PRESENT, "--exercise", "3"])
        .args(["-a", "are you ready", "-a", "does she works here"])
        .assert()
        .success();

    quizmark_in(&session)
        .args(["status", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Present Simple (present-simple)"))
        .stdout(predicate::str::contains("Current exercise: 3"))
        .stdout(predicate::str::contains("Graded questions:"))
        .stdout(predicate::str::contains("✓ q3-1"))
        .stdout(predicate::str::contains("✗ q3-2"))
        .stdout(predicate::str::contains("Score: 1/2 (50%)"));
}

#[test]
fn navigation_and_final_screen() {
    let dir = TempDir::new().unwrap();
    let session = session_file(&dir);

    quizmark_in(&session)
        .args(["go", "next", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise 2 (2 questions)"));

    quizmark_in(&session)
        .args(["check", "--answers", PRESENT, "-a", "he does not like coffee", "-a", "we can't swim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise 2"))
        .stdout(predicate::str::contains("All answers correct!"));

    quizmark_in(&session)
        .args(["go", "final", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final score: 2/2 (100%)"))
        .stdout(predicate::str::contains("Outstanding!"));

    quizmark_in(&session)
        .args(["check", "--answers", PRESENT, "-a", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("final screen"));

    quizmark_in(&session)
        .args(["reset", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started a new session"));

    quizmark_in(&session)
        .args(["status", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current exercise: 1"))
        .stdout(predicate::str::contains("Score: 0/0 (0%)"));
}

#[test]
fn go_rejects_bad_target() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["go", "sideways", "--answers", PRESENT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target"));
}

#[test]
fn recap_formats() {
    let dir = TempDir::new().unwrap();
    let session = session_file(&dir);

    quizmark_in(&session)
        .args(["check", "--answers", PRESENT, "--exercise", "1"])
        .args(["-a", "I am a student", "-a", "she is not heer"])
        .assert()
        .success();

    quizmark_in(&session)
        .args(["recap", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1/2 (50%)"))
        .stdout(predicate::str::contains("expected: she is not here"));

    let html = dir.path().join("out").join("recap.html");
    quizmark_in(&session)
        .args(["recap", "--answers", PRESENT, "--format", "html", "--output"])
        .arg(&html)
        .assert()
        .success();
    let content = std::fs::read_to_string(&html).unwrap();
    assert!(content.contains("<html"));
    assert!(content.contains("Present Simple"));

    let output = quizmark_in(&session)
        .args(["recap", "--answers", PRESENT, "--format", "json"])
        .output()
        .unwrap();
    let recap: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(recap["quiz_id"], "present-simple");
    assert_eq!(recap["exercises"].as_array().unwrap().len(), 3);

    quizmark_in(&session)
        .args(["recap", "--answers", PRESENT, "--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn corrupt_session_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let session = session_file(&dir);
    std::fs::write(&session, "{ definitely not json").unwrap();

    quizmark_in(&session)
        .args(["check", "--answers", PRESENT, "--exercise", "1", "-a", "I am a student"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1/1 (100%)"));
}

#[test]
fn validate_answer_table() {
    quizmark()
        .args(["validate", "--answers", PRESENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 exercises, 8 questions"))
        .stdout(predicate::str::contains("All answer tables valid"));
}

#[test]
fn validate_directory() {
    quizmark()
        .args(["validate", "--answers", "../../answer-tables"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Present Simple"))
        .stdout(predicate::str::contains("Past Simple"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("messy.toml");
    std::fs::write(
        &path,
        "[quiz]\nid = \"messy\"\nname = \"Messy\"\n\n[[exercises]]\nid = 1\nanswers = [\"ok\", \"\"]\n",
    )
    .unwrap();

    quizmark()
        .arg("validate")
        .arg("--answers")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[exercise 1] WARNING: q1-2: answer is blank"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    quizmark()
        .args(["validate", "--answers", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn normalize_text() {
    quizmark()
        .args(["normalize", "She isn't here!"])
        .assert()
        .success()
        .stdout(predicate::str::diff("she is not here\n"));
}

#[test]
fn normalize_against_expected() {
    quizmark()
        .args(["normalize", "teh cat sat", "--expected", "the cat sat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verdict:  incorrect"));

    quizmark()
        .args(["normalize", "I went to the markett", "--expected", "I went to the market"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accepted with typos"));
}

#[test]
fn answers_are_revealed() {
    let dir = TempDir::new().unwrap();

    quizmark_in(&session_file(&dir))
        .args(["answers", "--answers", PRESENT, "--exercise", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. he does not like coffee"))
        .stdout(predicate::str::contains("2. we cannot swim"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizmark.toml"))
        .stdout(predicate::str::contains("Created answers/example.toml"));

    assert!(dir.path().join("quizmark.toml").exists());
    assert!(dir.path().join("answers/example.toml").exists());

    // The generated config points at the generated table.
    quizmark()
        .current_dir(dir.path())
        .args(["check", "--exercise", "1", "-a", "I'm a student"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1/1 (100%)"));
    assert!(dir.path().join(".quizmark/session.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizmark().current_dir(dir.path()).arg("init").assert().success();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Forgiving quiz answer checker"));
}

#[test]
fn version_output() {
    quizmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizmark"));
}
