//! Question store port

use super::error::GatewayError;
use assessgen_domain::{DomainCategory, DraftQuestion, QuestionId, QuestionType, WorkflowRunId};
use async_trait::async_trait;
use serde::Serialize;

/// One answer option as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAnswer {
    pub text: String,
    pub is_correct: bool,
}

/// Per-draft store request: classification metadata, answer set, source
/// item and mapping labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreQuestionRequest {
    pub run_id: WorkflowRunId,
    pub title: String,
    pub question_type: QuestionType,
    pub domain_category: DomainCategory,
    pub answers: Vec<StoredAnswer>,
    pub source_item: String,
    pub mapping_type_name: String,
    pub mapping_value_name: String,
    pub reason: String,
}

impl StoreQuestionRequest {
    pub fn from_draft(draft: &DraftQuestion, run_id: WorkflowRunId, question_type: QuestionType) -> Self {
        let answers = draft
            .answer_options
            .iter()
            .enumerate()
            .map(|(i, text)| StoredAnswer {
                text: text.clone(),
                is_correct: i == draft.correct_answer_index,
            })
            .collect();

        Self {
            run_id,
            title: draft.title.clone(),
            question_type,
            domain_category: draft.domain_category,
            answers,
            source_item: draft.source_item.clone(),
            mapping_type_name: draft.mapping_type_name.clone(),
            mapping_value_name: draft.mapping_value_name.clone(),
            reason: draft.reason.clone(),
        }
    }
}

/// Persistence boundary for individual questions.
///
/// `Ok(None)` means the store answered without an id: the question was not
/// persisted.
#[async_trait]
pub trait QuestionStorePort: Send + Sync {
    async fn save(&self, request: &StoreQuestionRequest) -> Result<Option<QuestionId>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_marks_correct_answer() {
        let draft = DraftQuestion::new(
            "Which keyword moves a closure's captures?",
            vec!["ref".to_string(), "move".to_string(), "mut".to_string()],
            1,
        );
        let request = StoreQuestionRequest::from_draft(&draft, WorkflowRunId::new(), QuestionType::MultipleChoice);

        let correct: Vec<_> = request.answers.iter().filter(|a| a.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text, "move");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["question_type"], "multiple_choice");
        assert_eq!(json["domain_category"], "unclassified");
    }
}
