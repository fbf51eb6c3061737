//! Generation boundary adapter

use super::client::ApiClient;
use assessgen_application::{GatewayError, QuestionGeneratorPort};
use assessgen_domain::GenerationRequest;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

pub struct HttpQuestionGenerator {
    client: ApiClient,
    path: String,
}

impl HttpQuestionGenerator {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }
}

#[async_trait]
impl QuestionGeneratorPort for HttpQuestionGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GatewayError> {
        info!(
            "Requesting {} questions from {}",
            request.question_count,
            self.client.url(&self.path)
        );
        // Shape validation is left to the caller
        self.client.post_json(&self.path, request, None).await
    }
}
