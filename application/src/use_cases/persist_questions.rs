//! Question store
//!
//! Persists drafts strictly one at a time, in order. Sequential calls keep
//! failure attribution unambiguous and keep ids in draft order, which the
//! allocation pass depends on. If throughput ever needs concurrency, gather
//! results back into input order rather than completion order.

use super::error::WorkflowError;
use crate::ports::progress::WorkflowProgressNotifier;
use crate::ports::question_store::{QuestionStorePort, StoreQuestionRequest};
use assessgen_domain::{
    DraftQuestion, PersistedQuestion, QuestionType, WorkflowRun, WorkflowRunId,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Persistence stopped at `index`; `persisted` holds the ids obtained
/// before it. Those ids are not rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("question {index} was not stored: {reason}")]
pub struct PersistError {
    pub index: usize,
    pub reason: String,
    pub persisted: Vec<PersistedQuestion>,
}

impl From<PersistError> for WorkflowError {
    fn from(error: PersistError) -> Self {
        WorkflowError::StoreFailed {
            index: error.index,
            reason: error.reason,
        }
    }
}

/// Run-scoped values every store request carries
#[derive(Debug, Clone, Copy)]
pub struct PersistContext {
    pub run_id: WorkflowRunId,
    pub question_type: QuestionType,
}

/// Sequential, order-preserving persistence of drafts
pub struct QuestionStore {
    port: Arc<dyn QuestionStorePort>,
}

impl QuestionStore {
    pub fn new(port: Arc<dyn QuestionStorePort>) -> Self {
        Self { port }
    }

    /// Persist every draft, one request each, in input order.
    pub async fn persist_all(
        &self,
        drafts: &[DraftQuestion],
        context: &PersistContext,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<Vec<PersistedQuestion>, PersistError> {
        self.persist_from(drafts, 0, context, progress).await
    }

    /// Persist `drafts`, numbering them from `offset` in the originating
    /// draft list. Aborts at the first failure.
    pub async fn persist_from(
        &self,
        drafts: &[DraftQuestion],
        offset: usize,
        context: &PersistContext,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<Vec<PersistedQuestion>, PersistError> {
        info!("Persisting {} questions starting at draft {}", drafts.len(), offset);
        progress.on_persist_start(drafts.len());

        let mut persisted = Vec::with_capacity(drafts.len());
        for (i, draft) in drafts.iter().enumerate() {
            let index = offset + i;
            let request = StoreQuestionRequest::from_draft(draft, context.run_id, context.question_type);

            let reason = match self.port.save(&request).await {
                Ok(Some(id)) => {
                    debug!("Draft {} stored as {}", index, id);
                    progress.on_question_persisted(index, &id);
                    persisted.push(PersistedQuestion::new(id, index));
                    continue;
                }
                Ok(None) => "store returned no question id".to_string(),
                Err(e) => e.user_message(),
            };

            warn!("Draft {} was not stored: {}", index, reason);
            progress.on_persist_complete(persisted.len(), Some(index));
            return Err(PersistError {
                index,
                reason,
                persisted,
            });
        }

        progress.on_persist_complete(persisted.len(), None);
        Ok(persisted)
    }

    /// Store whatever the run has not stored yet and record the ids on it.
    ///
    /// No-op once `questions_saved` is set. After a partial failure the
    /// next call resumes at the first unsaved draft.
    pub async fn save_pending(
        &self,
        run: &mut WorkflowRun,
        question_type: QuestionType,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<usize, WorkflowError> {
        if run.questions_saved() {
            debug!("Questions already saved; skipping persistence");
            return Ok(0);
        }
        run.begin_persist()?;

        let context = PersistContext {
            run_id: run.assessment().run_id(),
            question_type,
        };
        let (offset, pending) = run.pending_drafts();
        let pending = pending.to_vec();

        match self.persist_from(&pending, offset, &context, progress).await {
            Ok(stored) => {
                let count = stored.len();
                for question in stored {
                    run.record_persisted(question)?;
                }
                run.mark_saved();
                Ok(count)
            }
            Err(failure) => {
                for question in failure.persisted.iter().cloned() {
                    run.record_persisted(question)?;
                }
                Err(failure.into())
            }
        }
    }
}
