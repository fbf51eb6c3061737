//! Mapping entry entity

use super::category::DomainCategory;
use crate::core::error::DomainError;
use crate::core::string::is_blank;
use serde::{Deserialize, Serialize};

/// One taxonomy bucket: which type/value generated questions are drawn
/// from, how many, and what each is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub type_id: String,
    pub type_name: String,
    pub value_id: String,
    pub value_name: String,
    /// Human-readable justification carried from the taxonomy value
    pub reason: String,
    /// Always >= 1
    pub question_count: u32,
    /// Marks per question
    pub marks: u32,
    /// Derived from `type_name`
    pub domain_category: DomainCategory,
}

impl Default for MappingEntry {
    fn default() -> Self {
        Self {
            type_id: String::new(),
            type_name: String::new(),
            value_id: String::new(),
            value_name: String::new(),
            reason: String::new(),
            question_count: 1,
            marks: 1,
            domain_category: DomainCategory::Unclassified,
        }
    }
}

/// A single field edit on a [`MappingEntry`].
///
/// Edits cascade: selecting a new type clears the value selection and its
/// reason, and changing the question count resets marks to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingUpdate {
    Type { id: String, name: String },
    Value {
        id: String,
        name: String,
        reason: Option<String>,
    },
    Reason(String),
    QuestionCount(u32),
    Marks(u32),
}

impl MappingEntry {
    /// Create a fully-selected entry
    pub fn new(
        type_id: impl Into<String>,
        type_name: impl Into<String>,
        value_id: impl Into<String>,
        value_name: impl Into<String>,
    ) -> Self {
        let type_name = type_name.into();
        Self {
            type_id: type_id.into(),
            domain_category: DomainCategory::classify(&type_name),
            type_name,
            value_id: value_id.into(),
            value_name: value_name.into(),
            ..Self::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Set the question count. A count of zero is clamped to 1.
    pub fn with_question_count(mut self, count: u32) -> Self {
        self.question_count = count.max(1);
        self
    }

    pub fn with_marks(mut self, marks: u32) -> Self {
        self.marks = marks;
        self
    }

    /// Apply a field edit with its cascading resets
    pub fn apply(&mut self, update: MappingUpdate) -> Result<(), DomainError> {
        match update {
            MappingUpdate::Type { id, name } => {
                self.type_id = id;
                self.domain_category = DomainCategory::classify(&name);
                self.type_name = name;
                self.value_id.clear();
                self.value_name.clear();
                self.reason.clear();
            }
            MappingUpdate::Value { id, name, reason } => {
                self.value_id = id;
                self.value_name = name;
                self.reason = reason.unwrap_or_default();
            }
            MappingUpdate::Reason(reason) => self.reason = reason,
            MappingUpdate::QuestionCount(count) => {
                if count == 0 {
                    return Err(DomainError::InvalidQuestionCount);
                }
                self.question_count = count;
                self.marks = 1;
            }
            MappingUpdate::Marks(marks) => self.marks = marks,
        }
        Ok(())
    }

    /// Marks contributed by this bucket (`question_count × marks`)
    pub fn total_marks(&self) -> u64 {
        u64::from(self.question_count) * u64::from(self.marks)
    }

    /// Both a type and a value have been chosen
    pub fn is_selected(&self) -> bool {
        !is_blank(&self.type_id) && !is_blank(&self.value_id)
    }

    /// Short "Type / Value" label for tables and logs
    pub fn label(&self) -> String {
        format!("{} / {}", self.type_name, self.value_name)
    }
}
