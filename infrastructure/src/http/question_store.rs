//! Persistence boundary adapter

use super::client::ApiClient;
use assessgen_application::{GatewayError, QuestionStorePort, StoreQuestionRequest};
use assessgen_domain::QuestionId;
use async_trait::async_trait;
use serde_json::Value;

pub struct HttpQuestionStore {
    client: ApiClient,
    path: String,
}

impl HttpQuestionStore {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }
}

/// Read `question_id` from the store response, top-level or under `data`.
///
/// A body with an error message and no id is a rejection.
pub fn parse_store_response(body: &Value) -> Result<Option<QuestionId>, GatewayError> {
    let id = QuestionId::from_json(body.get("question_id"))
        .or_else(|| QuestionId::from_json(body.get("data").and_then(|d| d.get("question_id"))));
    if id.is_some() {
        return Ok(id);
    }
    match super::client::error_message(body) {
        Some(message) => Err(GatewayError::Rejected(message)),
        None => Ok(None),
    }
}

#[async_trait]
impl QuestionStorePort for HttpQuestionStore {
    async fn save(&self, request: &StoreQuestionRequest) -> Result<Option<QuestionId>, GatewayError> {
        let body = self.client.post_json(&self.path, request, None).await?;
        parse_store_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids() {
        assert_eq!(
            parse_store_response(&json!({ "question_id": 101 })).unwrap(),
            Some(QuestionId::from(101u64))
        );
        assert_eq!(
            parse_store_response(&json!({ "data": { "question_id": "q-7" } })).unwrap(),
            Some(QuestionId::from("q-7"))
        );
    }

    #[test]
    fn test_falsy_id_means_not_stored() {
        assert_eq!(parse_store_response(&json!({ "question_id": 0 })).unwrap(), None);
        assert_eq!(parse_store_response(&json!({ "question_id": "" })).unwrap(), None);
        assert_eq!(parse_store_response(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_error_body_is_rejection() {
        let err = parse_store_response(&json!({ "question_id": null, "message": "Duplicate title" }))
            .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Duplicate title".to_string()));
    }
}
