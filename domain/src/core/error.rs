//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Mapping index {index} out of range (mapping set has {len} entries)")]
    MappingIndexOutOfRange { index: usize, len: usize },

    #[error("Question count must be at least 1")]
    InvalidQuestionCount,

    #[error("Mapping set is locked once question generation has started")]
    MappingLocked,

    #[error("Mapping set must contain at least one entry")]
    EmptyMappingSet,

    #[error("Assessment has already been acknowledged and cannot be modified")]
    AssessmentSealed,
}
