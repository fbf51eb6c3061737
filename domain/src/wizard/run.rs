//! Workflow run state machine.
//!
//! [`WorkflowRun`] is the single owner of everything one pass through the
//! wizard accumulates: the assessment record, the current step, generated
//! drafts, persisted ids and the `questions_saved` guard. The application
//! layer borrows it mutably for each action; nothing here does I/O.

use super::step::{WizardStep, WorkflowStatus};
use super::validation::{ValidationIssue, mapping_issues, validate_step};
use crate::assessment::draft::AssessmentDraft;
use crate::assessment::settings::AssessmentSettings;
use crate::assessment::submission::SubmissionAck;
use crate::core::error::DomainError;
use crate::mapping::set::MappingSet;
use crate::question::draft::DraftQuestion;
use crate::question::persisted::PersistedQuestion;
use thiserror::Error;

/// Rejected wizard actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("validation failed: {}", super::validation::describe_issues(.0))]
    ValidationFailed(Vec<ValidationIssue>),

    #[error("cannot {action} while {status}")]
    InvalidTransition {
        status: WorkflowStatus,
        action: &'static str,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// State of one wizard pass
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    assessment: AssessmentDraft,
    status: WorkflowStatus,
    drafts: Vec<DraftQuestion>,
    persisted: Vec<PersistedQuestion>,
    questions_saved: bool,
    mapping_locked: bool,
}

impl WorkflowRun {
    pub fn new(settings: AssessmentSettings, mapping_set: MappingSet) -> Self {
        Self {
            assessment: AssessmentDraft::new(settings, mapping_set),
            status: WorkflowStatus::Active(WizardStep::FIRST),
            drafts: Vec::new(),
            persisted: Vec::new(),
            questions_saved: false,
            mapping_locked: false,
        }
    }

    // ==================== Accessors ====================

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn step(&self) -> Option<WizardStep> {
        self.status.step()
    }

    pub fn assessment(&self) -> &AssessmentDraft {
        &self.assessment
    }

    pub fn mapping_set(&self) -> &MappingSet {
        self.assessment.mapping_set()
    }

    pub fn drafts(&self) -> &[DraftQuestion] {
        &self.drafts
    }

    pub fn persisted(&self) -> &[PersistedQuestion] {
        &self.persisted
    }

    /// Drafts not yet acknowledged by the store, with their draft index
    pub fn pending_drafts(&self) -> (usize, &[DraftQuestion]) {
        let start = self.persisted.len().min(self.drafts.len());
        (start, &self.drafts[start..])
    }

    pub fn questions_saved(&self) -> bool {
        self.questions_saved
    }

    pub fn mapping_locked(&self) -> bool {
        self.mapping_locked
    }

    pub fn validate_current(&self) -> Vec<ValidationIssue> {
        match self.step() {
            Some(step) => validate_step(step, &self.assessment, &self.drafts),
            None => Vec::new(),
        }
    }

    // ==================== Editing ====================

    /// Mutable access to the mapping set, refused once generation started
    pub fn mapping_set_mut(&mut self) -> Result<&mut MappingSet, WizardError> {
        self.ensure_active("edit mappings")?;
        if self.mapping_locked {
            return Err(DomainError::MappingLocked.into());
        }
        Ok(self.assessment.mapping_set_mut()?)
    }

    pub fn settings_mut(&mut self) -> Result<&mut AssessmentSettings, WizardError> {
        self.ensure_active("edit settings")?;
        Ok(self.assessment.settings_mut()?)
    }

    // ==================== Generation ====================

    /// Check generation may start and lock the mapping set.
    ///
    /// Allowed in ReviewMapping until the first draft has been stored.
    pub fn begin_generation(&mut self) -> Result<(), WizardError> {
        let status = self.status;
        if status != WorkflowStatus::Active(WizardStep::ReviewMapping) || !self.persisted.is_empty() {
            return Err(WizardError::InvalidTransition {
                status,
                action: "generate questions",
            });
        }
        let issues = mapping_issues(&self.assessment);
        if !issues.is_empty() {
            return Err(WizardError::ValidationFailed(issues));
        }
        self.mapping_locked = true;
        Ok(())
    }

    /// Generation failed; unlock unless earlier drafts still depend on the mappings
    pub fn abort_generation(&mut self) {
        if self.drafts.is_empty() {
            self.mapping_locked = false;
        }
    }

    /// Replace the drafts with a fresh generation result
    pub fn record_drafts(&mut self, drafts: Vec<DraftQuestion>) {
        self.drafts = drafts;
        self.questions_saved = false;
    }

    // ==================== Persistence ====================

    /// Check persistence may run
    pub fn begin_persist(&self) -> Result<(), WizardError> {
        self.ensure_active("save questions")?;
        if self.drafts.is_empty() {
            return Err(WizardError::ValidationFailed(vec![ValidationIssue::NoDraftsGenerated]));
        }
        Ok(())
    }

    /// Record one id acknowledged by the store
    pub fn record_persisted(&mut self, question: PersistedQuestion) -> Result<(), WizardError> {
        self.assessment.push_question_id(question.store_id.clone())?;
        self.persisted.push(question);
        Ok(())
    }

    /// Set the `questions_saved` guard once every draft has an id
    pub fn mark_saved(&mut self) {
        self.questions_saved = !self.drafts.is_empty() && self.persisted.len() == self.drafts.len();
    }

    // ==================== Navigation ====================

    /// Advance if the current step's predicate passes
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.active_step("go to the next step")?;
        let Some(next) = current.next() else {
            return Err(WizardError::InvalidTransition {
                status: self.status,
                action: "go past the last step",
            });
        };
        let issues = validate_step(current, &self.assessment, &self.drafts);
        if !issues.is_empty() {
            return Err(WizardError::ValidationFailed(issues));
        }
        self.status = WorkflowStatus::Active(next);
        Ok(next)
    }

    /// Step back; refused on the first step
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.active_step("go back")?;
        let Some(previous) = current.previous() else {
            return Err(WizardError::InvalidTransition {
                status: self.status,
                action: "go back from the first step",
            });
        };
        self.status = WorkflowStatus::Active(previous);
        Ok(previous)
    }

    /// End the run as a cancellation. Persisted ids are kept, nothing new is written.
    pub fn skip(&mut self) -> Result<(), WizardError> {
        self.active_step("skip")?;
        self.status = WorkflowStatus::Cancelled;
        Ok(())
    }

    /// Check `finish()` may run: only from a valid Summary
    pub fn begin_finish(&self) -> Result<(), WizardError> {
        let current = self.active_step("finish")?;
        if current != WizardStep::Summary {
            return Err(WizardError::InvalidTransition {
                status: self.status,
                action: "finish before the summary step",
            });
        }
        let issues = validate_step(current, &self.assessment, &self.drafts);
        if !issues.is_empty() {
            return Err(WizardError::ValidationFailed(issues));
        }
        Ok(())
    }

    /// Seal the assessment and end the run as persisted
    pub fn complete(&mut self, ack: SubmissionAck) -> Result<(), WizardError> {
        self.ensure_active("complete submission")?;
        self.assessment.acknowledge(ack)?;
        self.status = WorkflowStatus::Persisted;
        Ok(())
    }

    fn active_step(&self, action: &'static str) -> Result<WizardStep, WizardError> {
        self.status.step().ok_or(WizardError::InvalidTransition {
            status: self.status,
            action,
        })
    }

    fn ensure_active(&self, action: &'static str) -> Result<(), WizardError> {
        self.active_step(action).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::entry::{MappingEntry, MappingUpdate};

    fn run() -> WorkflowRun {
        let set = MappingSet::try_from(vec![
            MappingEntry::new("s", "Skill", "x", "X").with_question_count(2),
        ])
        .unwrap();
        WorkflowRun::new(AssessmentSettings::new("Rust", "Screening"), set)
    }

    fn drafts(n: usize) -> Vec<DraftQuestion> {
        (0..n)
            .map(|i| DraftQuestion::new(format!("Q{i}"), vec!["a".into(), "b".into()], 0))
            .collect()
    }

    #[test]
    fn test_starts_at_review_mapping() {
        let run = run();
        assert_eq!(run.step(), Some(WizardStep::ReviewMapping));
        assert!(!run.questions_saved());
    }

    #[test]
    fn test_next_blocked_without_drafts() {
        let mut run = run();
        assert_eq!(
            run.next().unwrap_err(),
            WizardError::ValidationFailed(vec![ValidationIssue::NoDraftsGenerated])
        );
        assert_eq!(run.step(), Some(WizardStep::ReviewMapping));
    }

    #[test]
    fn test_back_from_first_step_refused() {
        let mut run = run();
        assert!(matches!(run.back(), Err(WizardError::InvalidTransition { .. })));
    }

    #[test]
    fn test_full_walk() {
        let mut run = run();
        run.begin_generation().unwrap();
        run.record_drafts(drafts(2));
        assert_eq!(run.next().unwrap(), WizardStep::ConfigureSettings);
        assert_eq!(run.back().unwrap(), WizardStep::ReviewMapping);
        assert_eq!(run.next().unwrap(), WizardStep::ConfigureSettings);
        assert_eq!(run.next().unwrap(), WizardStep::Summary);
        assert!(matches!(run.next(), Err(WizardError::InvalidTransition { .. })));
        run.begin_finish().unwrap();
        run.complete(SubmissionAck::default()).unwrap();
        assert_eq!(run.status(), WorkflowStatus::Persisted);
        assert!(run.assessment().is_sealed());
    }

    #[test]
    fn test_generation_locks_mapping() {
        let mut run = run();
        run.mapping_set_mut().unwrap().add();
        run.mapping_set_mut()
            .unwrap()
            .update(1, MappingUpdate::Type { id: "k".into(), name: "Knowledge".into() })
            .unwrap();
        run.mapping_set_mut()
            .unwrap()
            .update(1, MappingUpdate::Value { id: "y".into(), name: "Y".into(), reason: None })
            .unwrap();

        run.begin_generation().unwrap();
        assert_eq!(
            run.mapping_set_mut().unwrap_err(),
            WizardError::Domain(DomainError::MappingLocked)
        );
    }

    #[test]
    fn test_failed_generation_unlocks() {
        let mut run = run();
        run.begin_generation().unwrap();
        run.abort_generation();
        assert!(!run.mapping_locked());
        assert!(run.mapping_set_mut().is_ok());
    }

    #[test]
    fn test_generation_requires_selected_mappings() {
        let mut run = WorkflowRun::new(AssessmentSettings::default(), MappingSet::new());
        assert_eq!(
            run.begin_generation().unwrap_err(),
            WizardError::ValidationFailed(vec![ValidationIssue::UnselectedMapping { index: 0 }])
        );
        assert!(!run.mapping_locked());
    }

    #[test]
    fn test_regeneration_refused_after_persisting() {
        let mut run = run();
        run.begin_generation().unwrap();
        run.record_drafts(drafts(2));
        run.record_persisted(PersistedQuestion::new("1", 0)).unwrap();
        assert!(matches!(
            run.begin_generation(),
            Err(WizardError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_pending_drafts_resume_after_partial_save() {
        let mut run = run();
        run.begin_generation().unwrap();
        run.record_drafts(drafts(2));
        run.record_persisted(PersistedQuestion::new("1", 0)).unwrap();
        run.mark_saved();
        assert!(!run.questions_saved());

        let (start, pending) = run.pending_drafts();
        assert_eq!(start, 1);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Q1");

        run.record_persisted(PersistedQuestion::new("2", 1)).unwrap();
        run.mark_saved();
        assert!(run.questions_saved());
        assert_eq!(run.assessment().question_ids().len(), 2);
    }

    #[test]
    fn test_skip_cancels_and_blocks_further_actions() {
        let mut run = run();
        run.skip().unwrap();
        assert_eq!(run.status(), WorkflowStatus::Cancelled);
        assert!(matches!(run.next(), Err(WizardError::InvalidTransition { .. })));
        assert!(matches!(run.skip(), Err(WizardError::InvalidTransition { .. })));
        assert!(run.settings_mut().is_err());
    }

    #[test]
    fn test_finish_only_from_summary() {
        let mut run = run();
        run.begin_generation().unwrap();
        run.record_drafts(drafts(2));
        run.next().unwrap();
        assert!(matches!(
            run.begin_finish(),
            Err(WizardError::InvalidTransition { .. })
        ));
    }
}
