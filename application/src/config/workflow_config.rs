//! Workflow behavior configuration

use assessgen_domain::{AllocationMode, QuestionType};

/// Controls how a workflow run generates and allocates questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// How allocation treats a mismatch between bucket demand and stored ids
    pub allocation: AllocationMode,
    /// Kind of question requested from the generator and recorded on store
    pub question_type: QuestionType,
}

impl WorkflowConfig {
    pub fn with_allocation(mut self, allocation: AllocationMode) -> Self {
        self.allocation = allocation;
        self
    }

    pub fn with_question_type(mut self, question_type: QuestionType) -> Self {
        self.question_type = question_type;
        self
    }

    /// Strict allocation unless explicitly relaxed
    pub fn from_strict(strict: bool) -> Self {
        let allocation = if strict {
            AllocationMode::Strict
        } else {
            AllocationMode::Lenient
        };
        Self::default().with_allocation(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_multiple_choice() {
        let config = WorkflowConfig::default();
        assert_eq!(config.allocation, AllocationMode::Strict);
        assert_eq!(config.question_type, QuestionType::MultipleChoice);
    }

    #[test]
    fn test_from_strict() {
        assert_eq!(WorkflowConfig::from_strict(false).allocation, AllocationMode::Lenient);
    }
}
