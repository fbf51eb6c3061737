//! Taxonomy lookup port (read-only)

use super::error::GatewayError;
use assessgen_domain::{TaxonomyType, TaxonomyValue};
use async_trait::async_trait;

#[async_trait]
pub trait TaxonomyPort: Send + Sync {
    /// All taxonomy types
    async fn list_types(&self) -> Result<Vec<TaxonomyType>, GatewayError>;

    /// Values under one type, each with an optional reason
    async fn list_values(&self, type_id: &str) -> Result<Vec<TaxonomyValue>, GatewayError>;
}
