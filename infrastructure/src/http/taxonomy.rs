//! Taxonomy lookup adapter (read-only)

use super::client::ApiClient;
use assessgen_application::{GatewayError, TaxonomyPort};
use assessgen_domain::{TaxonomyType, TaxonomyValue};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct HttpTaxonomy {
    client: ApiClient,
    path: String,
}

impl HttpTaxonomy {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    fn values_path(&self, type_id: &str) -> String {
        format!("{}/{}/values", self.path.trim_end_matches('/'), type_id)
    }
}

/// Accept a bare array or one wrapped in `data`
pub fn parse_list<T: DeserializeOwned>(body: &Value) -> Result<Vec<T>, GatewayError> {
    let list = match body {
        Value::Array(_) => body,
        other => other.get("data").ok_or_else(|| {
            GatewayError::InvalidResponse("expected a list or a 'data' list".to_string())
        })?,
    };
    serde_json::from_value(list.clone()).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl TaxonomyPort for HttpTaxonomy {
    async fn list_types(&self) -> Result<Vec<TaxonomyType>, GatewayError> {
        let body = self.client.get_json(&self.path).await?;
        parse_list(&body)
    }

    async fn list_values(&self, type_id: &str) -> Result<Vec<TaxonomyValue>, GatewayError> {
        let body = self.client.get_json(&self.values_path(type_id)).await?;
        parse_list(&body)
    }
}
