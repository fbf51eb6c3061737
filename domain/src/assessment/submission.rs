//! Submission payload and acknowledgement

use super::draft::AssessmentDraft;
use super::run_id::WorkflowRunId;
use super::settings::{DisplayFlags, Timing};
use crate::allocation::{MappingTag, QuestionMappingAssociation};
use crate::question::persisted::join_ids;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body sent to the assessment store boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub run_id: WorkflowRunId,
    pub title: String,
    pub description: String,
    pub timing: Timing,
    pub display_flags: DisplayFlags,
    pub total_marks: u64,
    pub total_questions: u64,
    /// Ordered, comma-joined store ids
    pub question_ids: String,
    pub mappings: BTreeMap<String, Vec<MappingTag>>,
}

impl SubmissionPayload {
    /// Combine the assessment record with its allocation result
    pub fn compose(draft: &AssessmentDraft, associations: &QuestionMappingAssociation) -> Self {
        let settings = draft.settings();
        let totals = draft.mapping_set().aggregates();
        Self {
            run_id: draft.run_id(),
            title: settings.title.clone(),
            description: settings.description.clone(),
            timing: settings.timing.clone(),
            display_flags: settings.display_flags,
            total_marks: totals.total_marks,
            total_questions: totals.total_question_count,
            question_ids: join_ids(draft.question_ids()),
            mappings: associations.to_submission_map(),
        }
    }
}

/// Acknowledgement returned by the assessment store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionAck {
    pub assessment_id: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{AllocationMode, build_associations};
    use crate::assessment::settings::AssessmentSettings;
    use crate::mapping::entry::MappingEntry;
    use crate::mapping::set::MappingSet;
    use crate::question::persisted::QuestionId;

    #[test]
    fn test_compose_payload() {
        let set = MappingSet::try_from(vec![
            MappingEntry::new("s", "Skill", "x", "X").with_question_count(2),
            MappingEntry::new("k", "Knowledge", "y", "Y").with_question_count(1),
        ])
        .unwrap();
        let mut draft = AssessmentDraft::new(AssessmentSettings::new("Backend", "Screening"), set);
        for id in [101u64, 102, 103] {
            draft.push_question_id(QuestionId::from(id)).unwrap();
        }
        let assoc =
            build_associations(draft.mapping_set(), draft.question_ids(), AllocationMode::Strict).unwrap();

        let payload = SubmissionPayload::compose(&draft, &assoc);
        assert_eq!(payload.question_ids, "101,102,103");
        assert_eq!(payload.total_questions, 3);
        assert_eq!(payload.total_marks, 3);
        assert_eq!(payload.mappings.len(), 3);
        assert_eq!(payload.mappings["103"][0].mapping_type_id, "k");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["run_id"], draft.run_id().to_string());
        assert_eq!(json["mappings"]["101"][0]["mapping_value_id"], "x");
    }
}
