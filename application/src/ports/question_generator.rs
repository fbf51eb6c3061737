//! Question generation port
//!
//! Defines the interface for asking an AI backend to draft questions.

use super::error::GatewayError;
use assessgen_domain::GenerationRequest;
use async_trait::async_trait;
use serde_json::Value;

/// Generation boundary.
///
/// Returns the raw response body; shape validation happens in
/// [`GenerationClient`](crate::use_cases::generate_questions::GenerationClient)
/// so every adapter is held to the same contract.
#[async_trait]
pub trait QuestionGeneratorPort: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GatewayError>;
}
