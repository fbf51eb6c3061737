//! HTTP adapters for the backend boundaries
//!
//! | Adapter | Port | Endpoint |
//! |---------|------|----------|
//! | [`HttpQuestionGenerator`] | `QuestionGeneratorPort` | `POST [api] generate_path` |
//! | [`HttpQuestionStore`] | `QuestionStorePort` | `POST [api] question_path` |
//! | [`HttpAssessmentStore`] | `AssessmentStorePort` | `POST [api] assessment_path` |
//! | [`HttpTaxonomy`] | `TaxonomyPort` | `GET [api] taxonomy_path` |
//!
//! All adapters share one [`ApiClient`] (one `reqwest::Client`, bearer
//! token, timeout). No adapter retries.

mod assessment_store;
mod client;
mod generator;
mod question_store;
mod taxonomy;

pub use assessment_store::HttpAssessmentStore;
pub use client::ApiClient;
pub use generator::HttpQuestionGenerator;
pub use question_store::HttpQuestionStore;
pub use taxonomy::HttpTaxonomy;
