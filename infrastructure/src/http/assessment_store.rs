//! Submission boundary adapter

use super::client::{ApiClient, error_message};
use assessgen_application::{AssessmentStorePort, GatewayError};
use assessgen_domain::{SubmissionAck, SubmissionPayload};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

pub struct HttpAssessmentStore {
    client: ApiClient,
    path: String,
}

impl HttpAssessmentStore {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }
}

/// Interpret the submission response.
///
/// `success: false` or an error message without an assessment id is a
/// rejection whose message is surfaced verbatim.
pub fn parse_submission_response(body: &Value) -> Result<SubmissionAck, GatewayError> {
    let failed = body.get("success").and_then(Value::as_bool) == Some(false);
    let assessment_id = body
        .get("assessment_id")
        .or_else(|| body.get("id"))
        .and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    if failed || (assessment_id.is_none() && body.get("error").is_some()) {
        let message = error_message(body).unwrap_or_else(|| "submission was rejected".to_string());
        return Err(GatewayError::Rejected(message));
    }

    Ok(SubmissionAck {
        assessment_id,
        message: body.get("message").and_then(Value::as_str).map(String::from),
    })
}

#[async_trait]
impl AssessmentStorePort for HttpAssessmentStore {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionAck, GatewayError> {
        let key = payload.run_id.to_string();
        info!("Submitting assessment with idempotency key {}", key);
        let body = self.client.post_json(&self.path, payload, Some(&key)).await?;
        parse_submission_response(&body)
    }
}
