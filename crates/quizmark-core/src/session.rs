//! The learner's session: score ledger, draft answers and position,
//! persisted through a [`SessionStore`].
//!
//! Each part is stored under its own key as a JSON string so that a damaged
//! entry only resets that part:
//!
//! | key                 | value                                             |
//! |---------------------|---------------------------------------------------|
//! | `scoreState`        | `{"score":2,"totalGraded":3}`                     |
//! | `answeredQuestions` | `{"q1-1":true,"q1-2":false}`                      |
//! | `exerciseAnswers`   | `{"exercise1":{"q1-1":"I am","q1-2":""}}`         |
//! | `activeExercise`    | `ex2`                                             |
//! | `isFinalScreen`     | `true`, absent otherwise                          |
//! | `sessionMeta`       | `{"id":"…","startedAt":"…","updatedAt":"…"}`      |

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::ledger::{AnsweredRecord, ScoreLedger, ScoreState};
use crate::model::{ExerciseId, QuestionId};
use crate::store::SessionStore;

const KEY_SCORE_STATE: &str = "scoreState";
const KEY_ANSWERED: &str = "answeredQuestions";
const KEY_EXERCISE_ANSWERS: &str = "exerciseAnswers";
const KEY_ACTIVE_EXERCISE: &str = "activeExercise";
const KEY_FINAL_SCREEN: &str = "isFinalScreen";
const KEY_META: &str = "sessionMeta";

/// Store keys, optionally namespaced so several quizzes can share a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionKeys {
    prefix: String,
}

impl SessionKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn all(&self) -> Vec<String> {
        [
            KEY_SCORE_STATE,
            KEY_ANSWERED,
            KEY_EXERCISE_ANSWERS,
            KEY_ACTIVE_EXERCISE,
            KEY_FINAL_SCREEN,
            KEY_META,
        ]
        .iter()
        .map(|k| self.key(k))
        .collect()
    }
}

/// Which panel the learner is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "panel", content = "exercise", rename_all = "lowercase")]
pub enum Position {
    Exercise(ExerciseId),
    Final,
}

impl Default for Position {
    fn default() -> Self {
        Position::Exercise(ExerciseId(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionMeta {
    fn fresh() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            started_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    meta: SessionMeta,
    ledger: ScoreLedger,
    drafts: BTreeMap<QuestionId, String>,
    position: Position,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            meta: SessionMeta::fresh(),
            ledger: ScoreLedger::new(),
            drafts: BTreeMap::new(),
            position: Position::default(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a session. Missing keys load as defaults; malformed values
    /// are logged and replaced by defaults.
    pub fn load(store: &dyn SessionStore, keys: &SessionKeys) -> Self {
        let meta = read_json::<SessionMeta>(store, &keys.key(KEY_META))
            .unwrap_or_else(SessionMeta::fresh);

        let record = read_json::<AnsweredRecord>(store, &keys.key(KEY_ANSWERED)).unwrap_or_default();
        let ledger = match read_json::<ScoreState>(store, &keys.key(KEY_SCORE_STATE)) {
            Some(state) => ScoreLedger::from_parts(record, state),
            None => ScoreLedger::from_record(record),
        };

        let drafts = read_json::<BTreeMap<String, BTreeMap<QuestionId, String>>>(
            store,
            &keys.key(KEY_EXERCISE_ANSWERS),
        )
        .unwrap_or_default()
        .into_values()
        .flatten()
        .collect();

        let position = if store.get(&keys.key(KEY_FINAL_SCREEN)).as_deref() == Some("true") {
            Position::Final
        } else {
            store
                .get(&keys.key(KEY_ACTIVE_EXERCISE))
                .and_then(|panel| {
                    let parsed = ExerciseId::from_panel_id(&panel);
                    if parsed.is_none() {
                        tracing::warn!(panel = %panel, "ignoring unknown active exercise");
                    }
                    parsed
                })
                .map(Position::Exercise)
                .unwrap_or_default()
        };

        let state = ledger.score_state();
        tracing::debug!(
            session = %meta.id,
            score = state.score,
            total = state.total_graded,
            drafts = drafts_len(&drafts),
            "loaded session"
        );

        Self {
            meta,
            ledger,
            drafts,
            position,
        }
    }

    /// Persist every part of the session in one store write.
    pub fn try_save(
        &mut self,
        store: &mut dyn SessionStore,
        keys: &SessionKeys,
    ) -> Result<(), StoreError> {
        self.meta.updated_at = Utc::now();

        let mut batch = vec![
            json_entry(keys, KEY_SCORE_STATE, &self.ledger.score_state())?,
            json_entry(keys, KEY_ANSWERED, self.ledger.record())?,
            json_entry(keys, KEY_EXERCISE_ANSWERS, &self.drafts_by_exercise())?,
        ];

        match self.position {
            Position::Final => batch.push((keys.key(KEY_FINAL_SCREEN), Some("true".into()))),
            Position::Exercise(ex) => {
                batch.push((keys.key(KEY_FINAL_SCREEN), None));
                batch.push((keys.key(KEY_ACTIVE_EXERCISE), Some(ex.panel_id())));
            }
        }

        batch.push(json_entry(keys, KEY_META, &self.meta)?);
        store.write_batch(&batch)
    }

    /// Persist the session, logging instead of failing.
    pub fn save(&mut self, store: &mut dyn SessionStore, keys: &SessionKeys) {
        if let Err(e) = self.try_save(store, keys) {
            tracing::warn!("failed to save session: {e}");
        }
    }

    /// Forget everything and remove every key this session owns.
    pub fn reset(&mut self, store: &mut dyn SessionStore, keys: &SessionKeys) {
        let batch: Vec<_> = keys.all().into_iter().map(|key| (key, None)).collect();
        if let Err(e) = store.write_batch(&batch) {
            tracing::warn!("failed to clear session: {e}");
        }
        *self = Self::default();
        tracing::info!(session = %self.meta.id, "started new session");
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ScoreLedger {
        &mut self.ledger
    }

    pub fn score_state(&self) -> ScoreState {
        self.ledger.score_state()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn draft(&self, question: &QuestionId) -> Option<&str> {
        self.drafts.get(question).map(String::as_str)
    }

    pub fn drafts(&self) -> &BTreeMap<QuestionId, String> {
        &self.drafts
    }

    pub fn set_draft(&mut self, question: QuestionId, value: impl Into<String>) {
        self.drafts.insert(question, value.into());
    }

    /// Drafts grouped under `exercise{n}` keys, the persisted layout.
    fn drafts_by_exercise(&self) -> BTreeMap<String, BTreeMap<&QuestionId, &str>> {
        let mut grouped: BTreeMap<String, BTreeMap<&QuestionId, &str>> = BTreeMap::new();
        for (question, value) in &self.drafts {
            let group = match question.exercise() {
                Some(ex) => format!("exercise{ex}"),
                None => "other".to_string(),
            };
            grouped
                .entry(group)
                .or_default()
                .insert(question, value.as_str());
        }
        grouped
    }
}

fn drafts_len(drafts: &BTreeMap<QuestionId, String>) -> usize {
    drafts.values().filter(|v| !v.trim().is_empty()).count()
}

fn read_json<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "malformed persisted value, resetting to default: {e}");
            None
        }
    }
}

fn json_entry<T: Serialize + ?Sized>(
    keys: &SessionKeys,
    name: &str,
    value: &T,
) -> Result<(String, Option<String>), StoreError> {
    let key = keys.key(name);
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.clone(),
        source,
    })?;
    Ok((key, Some(json)))
}
