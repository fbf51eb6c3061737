//! Progress notification port
//!
//! Defines the interface for reporting progress while the wizard talks to
//! its boundaries. All callbacks default to no-ops.

use assessgen_domain::{QuestionId, WizardStep};

/// Callback for progress updates during a workflow run
///
/// Implementations live in the presentation layer.
pub trait WorkflowProgressNotifier: Send + Sync {
    /// Called when the wizard moves to another step
    fn on_step_changed(&self, _step: WizardStep) {}

    /// Called before the generation request is sent
    fn on_generation_start(&self, _question_count: u64) {}

    /// Called when generation finishes
    fn on_generation_complete(&self, _success: bool, _draft_count: usize) {}

    /// Called before the sequential store loop starts
    fn on_persist_start(&self, _total: usize) {}

    /// Called after each draft is acknowledged by the store
    fn on_question_persisted(&self, _draft_index: usize, _id: &QuestionId) {}

    /// Called when the store loop ends (fully or at the first failure)
    fn on_persist_complete(&self, _persisted: usize, _failed_at: Option<usize>) {}

    /// Called before the final submission request
    fn on_submit_start(&self) {}

    /// Called when the submission request returns
    fn on_submit_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl WorkflowProgressNotifier for NoProgress {}
