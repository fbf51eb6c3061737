//! Generation client
//!
//! Stateless adapter between the wizard and the generation boundary. It
//! builds the request from the current mapping set, holds the response to
//! the ordering contract, and back-fills mapping labels by bucket.
//! Under strict allocation a draft count that differs from the bucket
//! demand is rejected here, before anything can be stored.

use super::error::WorkflowError;
use crate::config::WorkflowConfig;
use crate::ports::progress::WorkflowProgressNotifier;
use crate::ports::question_generator::QuestionGeneratorPort;
use assessgen_domain::{
    AllocationMode, DraftQuestion, GenerationContext, GenerationRequest, MappingSet,
    fill_mapping_labels, parse_generation_response,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Requests drafts for a mapping configuration.
///
/// The i-th returned draft belongs to the bucket reached by walking
/// cumulative `question_count`; allocation relies on this.
pub struct GenerationClient {
    generator: Arc<dyn QuestionGeneratorPort>,
}

impl GenerationClient {
    pub fn new(generator: Arc<dyn QuestionGeneratorPort>) -> Self {
        Self { generator }
    }

    /// Generate drafts for `mapping_set`. No retry; the caller decides.
    pub async fn generate(
        &self,
        mapping_set: &MappingSet,
        context: &GenerationContext,
        config: WorkflowConfig,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<Vec<DraftQuestion>, WorkflowError> {
        let request = GenerationRequest::new(context.clone(), mapping_set, config.question_type);
        info!(
            "Requesting {} {} questions across {} mappings",
            request.question_count,
            config.question_type,
            mapping_set.len()
        );
        progress.on_generation_start(request.question_count);

        let result = self.request_drafts(&request, mapping_set, config.allocation).await;
        progress.on_generation_complete(result.is_ok(), result.as_ref().map_or(0, Vec::len));
        result
    }

    async fn request_drafts(
        &self,
        request: &GenerationRequest,
        mapping_set: &MappingSet,
        allocation: AllocationMode,
    ) -> Result<Vec<DraftQuestion>, WorkflowError> {
        let body = self.generator.generate(request).await.map_err(|e| {
            warn!("Generation request failed: {}", e);
            WorkflowError::generation(e)
        })?;

        let mut drafts = parse_generation_response(&body).map_err(|e| {
            warn!("Generation response rejected: {}", e);
            WorkflowError::generation(e)
        })?;

        if drafts.is_empty() {
            return Err(WorkflowError::GenerationFailed(
                "generator returned no questions".to_string(),
            ));
        }

        if drafts.len() as u64 != request.question_count {
            if allocation == AllocationMode::Strict {
                return Err(WorkflowError::GenerationFailed(format!(
                    "generator returned {} questions, {} requested",
                    drafts.len(),
                    request.question_count
                )));
            }
            warn!(
                "Generator returned {} drafts for {} requested questions",
                drafts.len(),
                request.question_count
            );
        }

        fill_mapping_labels(&mut drafts, mapping_set);
        debug!("Parsed {} drafts", drafts.len());
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::error::GatewayError;
    use crate::ports::progress::NoProgress;
    use assessgen_domain::{MappingEntry, QuestionType};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct ScriptedGenerator {
        response: Result<Value, GatewayError>,
        requests: Mutex<Vec<u64>>,
    }

    impl ScriptedGenerator {
        fn new(response: Result<Value, GatewayError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuestionGeneratorPort for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<Value, GatewayError> {
            self.requests.lock().unwrap().push(request.question_count);
            self.response.clone()
        }
    }

    fn mapping_set() -> MappingSet {
        MappingSet::try_from(vec![
            MappingEntry::new("s", "Skill", "x", "X")
                .with_reason("core")
                .with_question_count(2),
            MappingEntry::new("k", "Knowledge", "y", "Y").with_question_count(1),
        ])
        .unwrap()
    }

    fn questions(n: usize) -> Value {
        json!({
            "questions": (0..n).map(|i| json!({
                "title": format!("Q{i}"),
                "answerOptions": ["a", "b", "c", "d"],
                "correctAnswerIndex": 2
            })).collect::<Vec<_>>()
        })
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_generate_back_fills_labels_by_bucket() {
        let generator = Arc::new(ScriptedGenerator::new(Ok(questions(3))));
        let client = GenerationClient::new(generator.clone());

        let drafts = client
            .generate(
                &mapping_set(),
                &GenerationContext::new("Backend Engineer"),
                WorkflowConfig::default(),
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].mapping_value_name, "X");
        assert_eq!(drafts[0].reason, "core");
        assert_eq!(drafts[1].mapping_value_name, "X");
        assert_eq!(drafts[2].mapping_type_name, "Knowledge");
        assert_eq!(*generator.requests.lock().unwrap(), vec![3]);
    }

    #[tokio::test]
    async fn test_non_list_questions_is_generation_failed() {
        let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(Ok(
            json!({"questions": "not a list"}),
        ))));

        let err = client
            .generate(&mapping_set(), &GenerationContext::default(), WorkflowConfig::default(), &NoProgress)
            .await
            .unwrap_err();

        match err {
            WorkflowError::GenerationFailed(reason) => assert!(reason.contains("must be a list")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gateway_error_is_generation_failed() {
        let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(Err(
            GatewayError::Timeout,
        ))));

        let err = client
            .generate(&mapping_set(), &GenerationContext::default(), WorkflowConfig::default(), &NoProgress)
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::GenerationFailed("Timeout".to_string()));
    }

    #[tokio::test]
    async fn test_empty_list_is_generation_failed() {
        let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(Ok(questions(0)))));
        let err = client
            .generate(&mapping_set(), &GenerationContext::default(), WorkflowConfig::default(), &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_short_generation_rejected_under_strict_allocation() {
        let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(Ok(questions(2)))));
        let err = client
            .generate(&mapping_set(), &GenerationContext::default(), WorkflowConfig::default(), &NoProgress)
            .await
            .unwrap_err();

        match err {
            WorkflowError::GenerationFailed(reason) => {
                assert_eq!(reason, "generator returned 2 questions, 3 requested")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_short_generation_kept_under_lenient_allocation() {
        let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(Ok(questions(2)))));
        let config = WorkflowConfig::from_strict(false).with_question_type(QuestionType::TrueFalse);

        let drafts = client
            .generate(&mapping_set(), &GenerationContext::default(), config, &NoProgress)
            .await
            .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].mapping_value_name, "X");
    }
}
