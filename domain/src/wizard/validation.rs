//! Step validation predicates.
//!
//! Each step has a predicate that must pass before `next()` leaves it.
//! Validation is purely local and never touches the network.

use super::step::WizardStep;
use crate::assessment::draft::AssessmentDraft;
use crate::core::string::is_blank;
use crate::question::draft::DraftQuestion;
use std::fmt;

/// A single unmet precondition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Mapping entry at this index has no type or value selected
    UnselectedMapping { index: usize },
    /// Questions have not been generated yet
    NoDraftsGenerated,
    EmptyTitle,
    EmptyDescription,
    ZeroTotalMarks,
    ZeroQuestionCount,
    /// Availability window ends before it starts
    InvalidTimeWindow,
    /// Mapping names a taxonomy type or value the lookup service does not know
    UnknownTaxonomy { index: usize, name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnselectedMapping { index } => {
                write!(f, "mapping {} needs both a type and a value", index + 1)
            }
            ValidationIssue::NoDraftsGenerated => write!(f, "generate questions before continuing"),
            ValidationIssue::EmptyTitle => write!(f, "title is required"),
            ValidationIssue::EmptyDescription => write!(f, "description is required"),
            ValidationIssue::ZeroTotalMarks => write!(f, "total marks must be greater than zero"),
            ValidationIssue::ZeroQuestionCount => {
                write!(f, "total question count must be greater than zero")
            }
            ValidationIssue::InvalidTimeWindow => write!(f, "end time must be after start time"),
            ValidationIssue::UnknownTaxonomy { index, name } => {
                write!(f, "mapping {}: unknown taxonomy entry '{}'", index + 1, name)
            }
        }
    }
}

/// Render a list of issues as one message
pub fn describe_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Issues blocking generation: every bucket must be fully selected
pub fn mapping_issues(assessment: &AssessmentDraft) -> Vec<ValidationIssue> {
    assessment
        .mapping_set()
        .unselected()
        .into_iter()
        .map(|index| ValidationIssue::UnselectedMapping { index })
        .collect()
}

fn settings_issues(assessment: &AssessmentDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let settings = assessment.settings();
    if is_blank(&settings.title) {
        issues.push(ValidationIssue::EmptyTitle);
    }
    if is_blank(&settings.description) {
        issues.push(ValidationIssue::EmptyDescription);
    }
    let totals = assessment.mapping_set().aggregates();
    if totals.total_marks == 0 {
        issues.push(ValidationIssue::ZeroTotalMarks);
    }
    if totals.total_question_count == 0 {
        issues.push(ValidationIssue::ZeroQuestionCount);
    }
    if !settings.timing.window_is_valid() {
        issues.push(ValidationIssue::InvalidTimeWindow);
    }
    issues
}

/// Evaluate the predicate guarding the given step
pub fn validate_step(
    step: WizardStep,
    assessment: &AssessmentDraft,
    drafts: &[DraftQuestion],
) -> Vec<ValidationIssue> {
    match step {
        WizardStep::ReviewMapping => {
            let mut issues = mapping_issues(assessment);
            if drafts.is_empty() {
                issues.push(ValidationIssue::NoDraftsGenerated);
            }
            issues
        }
        WizardStep::ConfigureSettings => settings_issues(assessment),
        WizardStep::Summary => {
            let mut issues = settings_issues(assessment);
            if drafts.is_empty() {
                issues.push(ValidationIssue::NoDraftsGenerated);
            }
            issues
        }
    }
}
