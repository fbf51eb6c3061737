//! Infrastructure layer for assessgen
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration and plan file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod plan;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat,
};
pub use http::{ApiClient, HttpAssessmentStore, HttpQuestionGenerator, HttpQuestionStore, HttpTaxonomy};
pub use logging::JsonlWorkflowLogger;
pub use plan::{AssessmentPlan, PlanError, PlanLoader};
