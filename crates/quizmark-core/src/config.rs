//! Quiz configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::QuizEngineConfig;
use crate::session::SessionKeys;
use crate::similarity::MatchPolicy;

/// Environment variable overriding [`QuizConfig::session_path`].
pub const SESSION_ENV: &str = "QUIZMARK_SESSION";

/// Top-level quizmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// File the session store lives in.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    /// Prefix for every session key, to keep quizzes sharing a file apart.
    #[serde(default)]
    pub key_prefix: String,
    /// Default answer table file or directory.
    #[serde(default)]
    pub answers: Option<PathBuf>,
    /// Typo tolerance.
    #[serde(default)]
    pub matching: MatchPolicy,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".quizmark/session.json")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            session_path: default_session_path(),
            key_prefix: String::new(),
            answers: None,
            matching: MatchPolicy::default(),
        }
    }
}

impl QuizConfig {
    pub fn engine_config(&self) -> QuizEngineConfig {
        QuizEngineConfig {
            policy: self.matching,
            keys: SessionKeys::new(self.key_prefix.clone()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables expand to nothing.
pub fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizmark.toml` in the current directory
/// 2. `~/.config/quizmark/config.toml`
///
/// `QUIZMARK_SESSION` overrides the session path.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    Ok(apply_overrides(config, std::env::var(SESSION_ENV).ok()))
}

/// Parse a config file body and expand `${VAR}` references in its paths.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    let mut config: QuizConfig = toml::from_str(content)?;
    config.session_path = resolve_path(&config.session_path);
    config.answers = config.answers.as_deref().map(resolve_path);
    Ok(config)
}

fn apply_overrides(mut config: QuizConfig, session: Option<String>) -> QuizConfig {
    if let Some(session) = session.filter(|s| !s.trim().is_empty()) {
        config.session_path = PathBuf::from(resolve_env_vars(&session));
    }
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZMARK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZMARK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZMARK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_QUIZMARK_UNSET_VAR}/x"), "/x");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZMARK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_QUIZMARK_TEST_SELF", "${_QUIZMARK_TEST_SELF}");
        assert_eq!(
            resolve_env_vars("a/${_QUIZMARK_TEST_SELF}/b"),
            "a/${_QUIZMARK_TEST_SELF}/b"
        );
        std::env::remove_var("_QUIZMARK_TEST_SELF");
    }

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.session_path, PathBuf::from(".quizmark/session.json"));
        assert!(config.key_prefix.is_empty());
        assert_eq!(config.matching, MatchPolicy::default());
    }

    #[test]
    fn parse_full_config() {
        std::env::set_var("_QUIZMARK_TEST_HOME", "/home/learner");
        let config = parse_config_str(
            r#"
session_path = "${_QUIZMARK_TEST_HOME}/quiz/session.json"
key_prefix = "unit3."
answers = "answers/unit3.toml"

[matching]
long_word_min_len = 7
"#,
        )
        .unwrap();
        std::env::remove_var("_QUIZMARK_TEST_HOME");

        assert_eq!(
            config.session_path,
            PathBuf::from("/home/learner/quiz/session.json")
        );
        assert_eq!(config.answers, Some(PathBuf::from("answers/unit3.toml")));
        assert_eq!(config.matching.long_word_min_len, 7);
        assert_eq!(config.matching.long_word_tolerance, 1);
        assert_eq!(config.engine_config().policy, config.matching);
    }

    #[test]
    fn session_override() {
        let config = apply_overrides(QuizConfig::default(), Some("/tmp/other.json".into()));
        assert_eq!(config.session_path, PathBuf::from("/tmp/other.json"));

        let config = apply_overrides(QuizConfig::default(), Some("  ".into()));
        assert_eq!(config.session_path, default_session_path());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizmark.toml");
        std::fs::write(&path, "key_prefix = \"a.\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.key_prefix, "a.");
    }
}
