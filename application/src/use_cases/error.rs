//! Workflow error taxonomy
//!
//! Every boundary failure is caught where it happens and converted into one
//! of these kinds; partial progress (drafts, stored ids) stays on the
//! [`WorkflowRun`](assessgen_domain::WorkflowRun).

use crate::ports::error::GatewayError;
use assessgen_domain::{
    AllocationError, DomainError, ValidationIssue, WizardError, WorkflowStatus, describe_issues,
};
use thiserror::Error;

/// Errors surfaced by wizard actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Network or contract failure while drafting questions. Retry manually.
    #[error("Question generation failed: {0}")]
    GenerationFailed(String),

    /// Draft `index` did not persist; ids before it are kept.
    #[error("Failed to store question {}: {reason}", .index + 1)]
    StoreFailed { index: usize, reason: String },

    /// Final write failed; stored questions are not rolled back.
    #[error("Assessment submission failed: {0}")]
    SubmissionFailed(String),

    /// A step precondition was not met. Never touches the network.
    #[error("Validation failed: {}", describe_issues(.0))]
    ValidationFailed(Vec<ValidationIssue>),

    /// Stored ids do not line up with the mapping buckets
    #[error("Workflow inconsistency: {0}")]
    WorkflowInconsistency(String),

    #[error("Cannot {action} while {status}")]
    InvalidTransition {
        status: WorkflowStatus,
        action: &'static str,
    },

    #[error("Taxonomy lookup failed: {0}")]
    TaxonomyFailed(String),

    #[error(transparent)]
    Mapping(DomainError),
}

/// Coarse classification used for exit codes and messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A boundary call failed; the same action can be retried
    Network,
    /// Local precondition; fix the input and retry
    Validation,
    /// Internal state mismatch; the run should be restarted
    Inconsistency,
}

impl WorkflowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WorkflowError::GenerationFailed(_)
            | WorkflowError::StoreFailed { .. }
            | WorkflowError::SubmissionFailed(_)
            | WorkflowError::TaxonomyFailed(_) => ErrorCategory::Network,
            WorkflowError::ValidationFailed(_)
            | WorkflowError::InvalidTransition { .. }
            | WorkflowError::Mapping(_) => ErrorCategory::Validation,
            WorkflowError::WorkflowInconsistency(_) => ErrorCategory::Inconsistency,
        }
    }

    /// Whether re-invoking the same action can succeed
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub(crate) fn generation(error: impl ToString) -> Self {
        WorkflowError::GenerationFailed(error.to_string())
    }

    pub(crate) fn submission(error: &GatewayError) -> Self {
        WorkflowError::SubmissionFailed(error.user_message())
    }
}

impl From<WizardError> for WorkflowError {
    fn from(error: WizardError) -> Self {
        match error {
            WizardError::ValidationFailed(issues) => WorkflowError::ValidationFailed(issues),
            WizardError::InvalidTransition { status, action } => {
                WorkflowError::InvalidTransition { status, action }
            }
            WizardError::Domain(e) => WorkflowError::Mapping(e),
        }
    }
}

impl From<DomainError> for WorkflowError {
    fn from(error: DomainError) -> Self {
        WorkflowError::Mapping(error)
    }
}

impl From<AllocationError> for WorkflowError {
    fn from(error: AllocationError) -> Self {
        WorkflowError::WorkflowInconsistency(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessgen_domain::WizardStep;

    #[test]
    fn test_store_failed_display_is_one_based() {
        let error = WorkflowError::StoreFailed {
            index: 2,
            reason: "timeout".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to store question 3: timeout");
    }

    #[test]
    fn test_categories() {
        assert!(WorkflowError::GenerationFailed("x".into()).is_recoverable());
        assert!(WorkflowError::SubmissionFailed("x".into()).is_recoverable());
        assert!(!WorkflowError::ValidationFailed(vec![]).is_recoverable());
        assert_eq!(
            WorkflowError::WorkflowInconsistency("x".into()).category(),
            ErrorCategory::Inconsistency
        );
    }

    #[test]
    fn test_from_wizard_error() {
        let error: WorkflowError = WizardError::InvalidTransition {
            status: WorkflowStatus::Active(WizardStep::ReviewMapping),
            action: "go back",
        }
        .into();
        assert_eq!(error.to_string(), "Cannot go back while Review Mapping");

        let error: WorkflowError = WizardError::Domain(DomainError::MappingLocked).into();
        assert_eq!(error, WorkflowError::Mapping(DomainError::MappingLocked));
    }

    #[test]
    fn test_from_allocation_error() {
        let error: WorkflowError = AllocationError::Inconsistent {
            expected: 5,
            available: 3,
        }
        .into();
        assert!(matches!(error, WorkflowError::WorkflowInconsistency(_)));
        assert!(error.to_string().contains("demand 5"));
    }
}
