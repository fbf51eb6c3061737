//! Assessment wizard
//!
//! Drives one [`WorkflowRun`] through ReviewMapping → ConfigureSettings →
//! Summary. The wizard owns the run; every action borrows it exclusively,
//! so the mapping set cannot change while a boundary call is in flight.
//!
//! ```text
//! generate() ──▶ next() ──▶ next() ──▶ finish()
//!     │            │           │           │
//!  drafts    settings ok   summary    save (if needed) + allocate + submit
//! ```

use super::error::WorkflowError;
use super::generate_questions::GenerationClient;
use super::persist_questions::QuestionStore;
use super::submit_assessment::AssessmentAssembler;
use crate::config::WorkflowConfig;
use crate::ports::assessment_store::AssessmentStorePort;
use crate::ports::progress::{NoProgress, WorkflowProgressNotifier};
use crate::ports::question_generator::QuestionGeneratorPort;
use crate::ports::question_store::QuestionStorePort;
use crate::ports::workflow_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowLogger};
use assessgen_domain::{
    AssessmentSettings, GenerationContext, MappingAggregates, MappingUpdate, SubmissionAck,
    TaxonomyType, TaxonomyValue, WizardStep, WorkflowRun, WorkflowStatus,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AssessmentWizard {
    generation: GenerationClient,
    assembler: AssessmentAssembler,
    config: WorkflowConfig,
    context: GenerationContext,
    run: WorkflowRun,
    progress: Arc<dyn WorkflowProgressNotifier>,
    logger: Arc<dyn WorkflowLogger>,
}

impl AssessmentWizard {
    pub fn new(
        generator: Arc<dyn QuestionGeneratorPort>,
        questions: Arc<dyn QuestionStorePort>,
        assessments: Arc<dyn AssessmentStorePort>,
        config: WorkflowConfig,
        run: WorkflowRun,
        context: GenerationContext,
    ) -> Self {
        Self {
            generation: GenerationClient::new(generator),
            assembler: AssessmentAssembler::new(QuestionStore::new(questions), assessments, config),
            config,
            context,
            run,
            progress: Arc::new(NoProgress),
            logger: Arc::new(NoWorkflowLogger),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn WorkflowProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_workflow_logger(mut self, logger: Arc<dyn WorkflowLogger>) -> Self {
        self.logger = logger;
        self
    }

    // ==================== State ====================

    pub fn run(&self) -> &WorkflowRun {
        &self.run
    }

    pub fn into_run(self) -> WorkflowRun {
        self.run
    }

    pub fn status(&self) -> WorkflowStatus {
        self.run.status()
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Totals recomputed from the current mapping set
    pub fn aggregates(&self) -> MappingAggregates {
        self.run.mapping_set().aggregates()
    }

    // ==================== Mapping edits ====================

    /// Append a blank mapping entry and return its index
    pub fn add_mapping(&mut self) -> Result<usize, WorkflowError> {
        let set = self.run.mapping_set_mut()?;
        set.add();
        Ok(set.len() - 1)
    }

    /// Remove an entry. Returns `false` when it was the only one left.
    pub fn remove_mapping(&mut self, index: usize) -> Result<bool, WorkflowError> {
        Ok(self.run.mapping_set_mut()?.remove(index)?)
    }

    pub fn update_mapping(&mut self, index: usize, update: MappingUpdate) -> Result<(), WorkflowError> {
        self.run.mapping_set_mut()?.update(index, update)?;
        Ok(())
    }

    /// Pick a taxonomy type; clears the value and reason of that entry
    pub fn select_type(&mut self, index: usize, taxonomy_type: &TaxonomyType) -> Result<(), WorkflowError> {
        self.update_mapping(
            index,
            MappingUpdate::Type {
                id: taxonomy_type.id.clone(),
                name: taxonomy_type.name.clone(),
            },
        )
    }

    /// Pick a taxonomy value; its reason, if any, becomes the entry's reason
    pub fn select_value(&mut self, index: usize, value: &TaxonomyValue) -> Result<(), WorkflowError> {
        self.update_mapping(
            index,
            MappingUpdate::Value {
                id: value.id.clone(),
                name: value.name.clone(),
                reason: value.reason.clone(),
            },
        )
    }

    pub fn update_settings(
        &mut self,
        edit: impl FnOnce(&mut AssessmentSettings),
    ) -> Result<(), WorkflowError> {
        edit(self.run.settings_mut()?);
        Ok(())
    }

    // ==================== Boundary actions ====================

    /// Request drafts for the current mappings.
    ///
    /// May be repeated in ReviewMapping until a draft has been stored. The
    /// mapping set stays locked after the first successful generation.
    pub async fn generate(&mut self) -> Result<usize, WorkflowError> {
        self.run.begin_generation()?;

        let result = self
            .generation
            .generate(
                self.run.mapping_set(),
                &self.context,
                self.config,
                self.progress.as_ref(),
            )
            .await;

        match result {
            Ok(drafts) => {
                let count = drafts.len();
                self.run.record_drafts(drafts);
                self.logger.log(WorkflowEvent::new(
                    "generation_completed",
                    json!({
                        "run_id": self.run.assessment().run_id(),
                        "requested": self.aggregates().total_question_count,
                        "generated": count,
                    }),
                ));
                Ok(count)
            }
            Err(e) => {
                self.run.abort_generation();
                Err(e)
            }
        }
    }

    /// Store drafts that have no id yet. Allowed from ConfigureSettings or Summary.
    pub async fn save_questions(&mut self) -> Result<usize, WorkflowError> {
        let status = self.run.status();
        if !matches!(
            status,
            WorkflowStatus::Active(WizardStep::ConfigureSettings | WizardStep::Summary)
        ) {
            return Err(WorkflowError::InvalidTransition {
                status,
                action: "save questions",
            });
        }

        let before = self.run.persisted().len();
        let result = self
            .assembler
            .question_store()
            .save_pending(&mut self.run, self.config.question_type, self.progress.as_ref())
            .await;
        self.log_persisted_since(before);
        if let Err(e) = &result {
            self.log_failure(e);
        }
        result
    }

    /// Submit the assessment. Only from a valid Summary.
    pub async fn finish(&mut self) -> Result<SubmissionAck, WorkflowError> {
        self.run.begin_finish()?;

        let before = self.run.persisted().len();
        let result = self
            .assembler
            .submit(&mut self.run, self.progress.as_ref())
            .await;
        self.log_persisted_since(before);

        match &result {
            Ok(ack) => {
                info!("Workflow run {} persisted", self.run.assessment().run_id());
                self.logger.log(WorkflowEvent::new(
                    "submission_acknowledged",
                    json!({
                        "run_id": self.run.assessment().run_id(),
                        "assessment_id": ack.assessment_id,
                        "message": ack.message,
                    }),
                ));
            }
            Err(e) => self.log_failure(e),
        }
        result
    }

    // ==================== Navigation ====================

    pub fn next(&mut self) -> Result<WizardStep, WorkflowError> {
        let step = self.run.next()?;
        self.step_changed(step);
        Ok(step)
    }

    pub fn back(&mut self) -> Result<WizardStep, WorkflowError> {
        let step = self.run.back()?;
        self.step_changed(step);
        Ok(step)
    }

    /// Cancel the run. Already stored questions stay stored.
    pub fn skip(&mut self) -> Result<(), WorkflowError> {
        let step = self.run.step();
        self.run.skip()?;
        info!("Workflow run cancelled");
        self.logger.log(WorkflowEvent::new(
            "workflow_cancelled",
            json!({
                "run_id": self.run.assessment().run_id(),
                "step": step.map(|s| s.as_str()),
                "persisted": self.run.persisted().len(),
            }),
        ));
        Ok(())
    }

    fn step_changed(&self, step: WizardStep) {
        info!("Wizard step: {}", step);
        self.progress.on_step_changed(step);
        self.logger.log(WorkflowEvent::new(
            "step_changed",
            json!({
                "run_id": self.run.assessment().run_id(),
                "step": step.as_str(),
            }),
        ));
    }

    fn log_persisted_since(&self, before: usize) {
        let run_id = self.run.assessment().run_id();
        for question in self.run.persisted().iter().skip(before) {
            self.logger.log(WorkflowEvent::new(
                "question_persisted",
                json!({
                    "run_id": run_id,
                    "draft_index": question.originating_draft_index,
                    "question_id": question.store_id,
                }),
            ));
        }
    }

    fn log_failure(&self, error: &WorkflowError) {
        let run_id = self.run.assessment().run_id();
        match error {
            WorkflowError::StoreFailed { index, reason } => {
                warn!("Store failed at draft {}: {}", index, reason);
                self.logger.log(WorkflowEvent::new(
                    "store_failed",
                    json!({ "run_id": run_id, "index": index, "reason": reason }),
                ));
            }
            WorkflowError::SubmissionFailed(reason) => {
                self.logger.log(WorkflowEvent::new(
                    "submission_failed",
                    json!({ "run_id": run_id, "reason": reason }),
                ));
            }
            _ => {}
        }
    }
}
