//! Assessment store port

use super::error::GatewayError;
use assessgen_domain::{SubmissionAck, SubmissionPayload};
use async_trait::async_trait;

/// Submission boundary for the final assessment record.
///
/// Error messages returned by the backend must come back as
/// [`GatewayError::Rejected`] so they can be surfaced verbatim.
#[async_trait]
pub trait AssessmentStorePort: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionAck, GatewayError>;
}
