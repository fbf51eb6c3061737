//! Assessment assembler
//!
//! Builds the final submission from a workflow run: stores any unsaved
//! drafts first, allocates the stored ids back onto their buckets, then
//! calls the assessment store exactly once per attempt. Only a run that
//! stands at a valid Summary step is submitted; anything else is refused
//! before any I/O.

use super::error::WorkflowError;
use super::persist_questions::QuestionStore;
use crate::config::WorkflowConfig;
use crate::ports::assessment_store::AssessmentStorePort;
use crate::ports::progress::WorkflowProgressNotifier;
use assessgen_domain::{
    AllocationMode, SubmissionAck, SubmissionPayload, WorkflowRun, build_associations,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AssessmentAssembler {
    questions: QuestionStore,
    assessments: Arc<dyn AssessmentStorePort>,
    config: WorkflowConfig,
}

impl AssessmentAssembler {
    pub fn new(
        questions: QuestionStore,
        assessments: Arc<dyn AssessmentStorePort>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            questions,
            assessments,
            config,
        }
    }

    pub fn question_store(&self) -> &QuestionStore {
        &self.questions
    }

    /// Submit the run's assessment.
    ///
    /// On success the run becomes `Persisted`. On failure the run is left
    /// where it was so the caller can retry; stored questions are kept and
    /// will not be stored again.
    pub async fn submit(
        &self,
        run: &mut WorkflowRun,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<SubmissionAck, WorkflowError> {
        run.begin_finish()?;

        let demanded = run.mapping_set().aggregates().total_question_count;
        if self.config.allocation == AllocationMode::Strict && run.drafts().len() as u64 != demanded {
            return Err(WorkflowError::WorkflowInconsistency(format!(
                "{} drafts for mappings demanding {}",
                run.drafts().len(),
                demanded
            )));
        }

        if !run.questions_saved() {
            info!("Questions not saved yet; persisting before submission");
            self.questions
                .save_pending(run, self.config.question_type, progress)
                .await?;
        }

        let associations = build_associations(
            run.mapping_set(),
            run.assessment().question_ids(),
            self.config.allocation,
        )?;
        let stored = run.assessment().question_ids().len();
        if associations.len() as u64 != demanded || associations.len() != stored {
            warn!(
                "Allocated {} of {} stored questions to mappings demanding {}",
                associations.len(),
                stored,
                demanded
            );
        }

        let payload = SubmissionPayload::compose(run.assessment(), &associations);
        info!(
            "Submitting assessment '{}' with {} questions (run {})",
            payload.title, payload.total_questions, payload.run_id
        );

        progress.on_submit_start();
        let ack = match self.assessments.submit(&payload).await {
            Ok(ack) => ack,
            Err(e) => {
                warn!("Assessment submission failed: {}", e);
                progress.on_submit_complete(false);
                return Err(WorkflowError::submission(&e));
            }
        };
        progress.on_submit_complete(true);

        run.complete(ack.clone())?;
        info!("Assessment acknowledged: {:?}", ack.assessment_id);
        Ok(ack)
    }
}
