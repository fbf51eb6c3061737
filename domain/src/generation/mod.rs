//! Generation request value objects
//!
//! The job-role and skill context is supplied by the caller; the domain
//! only shapes it into the request the generation boundary expects.

use crate::mapping::set::MappingSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of question the generator should draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "multiple_choice" | "mcq" => Ok(QuestionType::MultipleChoice),
            "true_false" | "boolean" => Ok(QuestionType::TrueFalse),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Role and skill context the drafts are generated against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationContext {
    pub job_role: String,
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    /// Free-form extra guidance passed through to the generator
    pub instructions: Option<String>,
}

impl GenerationContext {
    pub fn new(job_role: impl Into<String>) -> Self {
        Self {
            job_role: job_role.into(),
            ..Self::default()
        }
    }

    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }
}

/// Body sent to the generation boundary
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub context: GenerationContext,
    #[serde(rename = "mappingSet")]
    pub mapping_set: MappingSet,
    #[serde(rename = "questionCount")]
    pub question_count: u64,
    #[serde(rename = "questionType")]
    pub question_type: QuestionType,
}

impl GenerationRequest {
    /// Snapshot the mapping set; the count is its current total
    pub fn new(context: GenerationContext, mapping_set: &MappingSet, question_type: QuestionType) -> Self {
        Self {
            context,
            question_count: mapping_set.aggregates().total_question_count,
            mapping_set: mapping_set.clone(),
            question_type,
        }
    }
}
