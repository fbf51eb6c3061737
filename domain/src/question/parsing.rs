//! Generation response parsing.
//!
//! Turns the raw JSON body returned by the generation boundary into
//! [`DraftQuestion`]s. Pure: no I/O, only shape checks.
//!
//! The body must carry a `questions` array. Each element is accepted in
//! either camelCase or snake_case, with `question`/`options` as fallbacks
//! for `title`/`answerOptions`.

use super::draft::DraftQuestion;
use crate::mapping::category::DomainCategory;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Reasons a generation response is unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("response has no `questions` field")]
    MissingQuestions,

    #[error("`questions` must be a list, got {0}")]
    NotAList(&'static str),

    #[error("question {index} is malformed: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct RawDraft {
    #[serde(alias = "question")]
    title: String,
    #[serde(alias = "answerOptions", alias = "options")]
    answer_options: Vec<String>,
    #[serde(alias = "correctAnswerIndex", alias = "answer_index")]
    correct_answer_index: usize,
    #[serde(default, alias = "mappingTypeName")]
    mapping_type_name: String,
    #[serde(default, alias = "mappingValueName")]
    mapping_value_name: String,
    #[serde(default)]
    reason: String,
    #[serde(default, alias = "domainCategory")]
    domain_category: Option<String>,
    #[serde(default, alias = "sourceItem")]
    source_item: String,
}

impl RawDraft {
    fn validate(self, index: usize) -> Result<DraftQuestion, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidQuestion {
            index,
            reason: reason.to_string(),
        };

        if self.title.trim().is_empty() {
            return Err(invalid("empty title"));
        }
        if self.answer_options.len() < 2 {
            return Err(invalid("fewer than two answer options"));
        }
        if self.correct_answer_index >= self.answer_options.len() {
            return Err(invalid("correct answer index is out of range"));
        }

        let domain_category = self
            .domain_category
            .as_deref()
            .map(DomainCategory::classify)
            .filter(|c| *c != DomainCategory::Unclassified)
            .unwrap_or_else(|| DomainCategory::classify(&self.mapping_type_name));

        Ok(DraftQuestion {
            title: self.title,
            answer_options: self.answer_options,
            correct_answer_index: self.correct_answer_index,
            mapping_type_name: self.mapping_type_name,
            mapping_value_name: self.mapping_value_name,
            reason: self.reason,
            domain_category,
            source_item: self.source_item,
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Parse a generation response body into drafts, preserving order.
pub fn parse_generation_response(body: &Value) -> Result<Vec<DraftQuestion>, ParseError> {
    let questions = body.get("questions").ok_or(ParseError::MissingQuestions)?;
    let Value::Array(items) = questions else {
        return Err(ParseError::NotAList(kind_of(questions)));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawDraft =
                serde_json::from_value(item.clone()).map_err(|e| ParseError::InvalidQuestion {
                    index,
                    reason: e.to_string(),
                })?;
            raw.validate(index)
        })
        .collect()
}
