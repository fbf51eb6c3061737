//! Assessment draft entity

use super::run_id::WorkflowRunId;
use super::settings::AssessmentSettings;
use super::submission::SubmissionAck;
use crate::core::error::DomainError;
use crate::mapping::set::MappingSet;
use crate::question::persisted::QuestionId;
use serde::{Deserialize, Serialize};

/// The assessment record a workflow run builds up.
///
/// Created when the run starts; sealed once the submission boundary
/// acknowledges it. It is the only entity that outlives the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    run_id: WorkflowRunId,
    settings: AssessmentSettings,
    mapping_set: MappingSet,
    question_ids: Vec<QuestionId>,
    acknowledgement: Option<SubmissionAck>,
}

impl AssessmentDraft {
    pub fn new(settings: AssessmentSettings, mapping_set: MappingSet) -> Self {
        Self {
            run_id: WorkflowRunId::new(),
            settings,
            mapping_set,
            question_ids: Vec::new(),
            acknowledgement: None,
        }
    }

    pub fn run_id(&self) -> WorkflowRunId {
        self.run_id
    }

    pub fn settings(&self) -> &AssessmentSettings {
        &self.settings
    }

    pub fn mapping_set(&self) -> &MappingSet {
        &self.mapping_set
    }

    /// Ordered ids of the questions stored so far
    pub fn question_ids(&self) -> &[QuestionId] {
        &self.question_ids
    }

    pub fn acknowledgement(&self) -> Option<&SubmissionAck> {
        self.acknowledgement.as_ref()
    }

    pub fn is_sealed(&self) -> bool {
        self.acknowledgement.is_some()
    }

    pub fn settings_mut(&mut self) -> Result<&mut AssessmentSettings, DomainError> {
        self.ensure_open()?;
        Ok(&mut self.settings)
    }

    pub fn mapping_set_mut(&mut self) -> Result<&mut MappingSet, DomainError> {
        self.ensure_open()?;
        Ok(&mut self.mapping_set)
    }

    /// Append an id acknowledged by the question store
    pub fn push_question_id(&mut self, id: QuestionId) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.question_ids.push(id);
        Ok(())
    }

    /// Seal the record with the boundary's acknowledgement
    pub fn acknowledge(&mut self, ack: SubmissionAck) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.acknowledgement = Some(ack);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_sealed() {
            return Err(DomainError::AssessmentSealed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sealed_after_acknowledge() {
        let mut draft = AssessmentDraft::new(AssessmentSettings::new("Rust", "Basics"), MappingSet::new());
        draft.push_question_id(QuestionId::from("1")).unwrap();
        draft.acknowledge(SubmissionAck::default()).unwrap();

        assert!(draft.is_sealed());
        assert_eq!(draft.settings_mut().unwrap_err(), DomainError::AssessmentSealed);
        assert_eq!(draft.mapping_set_mut().unwrap_err(), DomainError::AssessmentSealed);
        assert_eq!(
            draft.push_question_id(QuestionId::from("2")).unwrap_err(),
            DomainError::AssessmentSealed
        );
        assert_eq!(draft.question_ids().len(), 1);
    }

    #[test]
    fn test_each_draft_has_its_own_run_id() {
        let a = AssessmentDraft::new(AssessmentSettings::default(), MappingSet::new());
        let b = AssessmentDraft::new(AssessmentSettings::default(), MappingSet::new());
        assert_ne!(a.run_id(), b.run_id());
    }
}
