//! Persisted question identifiers

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Durable identifier assigned by the question store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an id from a store response field.
    ///
    /// Absent or falsy values (`null`, `false`, `0`, `""`) mean the
    /// question was not stored.
    pub fn from_json(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Number(n) => {
                if n.as_f64() == Some(0.0) {
                    None
                } else {
                    Some(Self(n.to_string()))
                }
            }
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A draft after the store has acknowledged it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedQuestion {
    pub store_id: QuestionId,
    /// Position of the draft this id was issued for
    pub originating_draft_index: usize,
}

impl PersistedQuestion {
    pub fn new(store_id: impl Into<QuestionId>, originating_draft_index: usize) -> Self {
        Self {
            store_id: store_id.into(),
            originating_draft_index,
        }
    }
}

/// Comma-join ids in order, as the submission boundary expects
pub fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(QuestionId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
