//! Application layer for assessgen
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::WorkflowConfig;
pub use ports::{
    assessment_store::AssessmentStorePort,
    error::GatewayError,
    progress::{NoProgress, WorkflowProgressNotifier},
    question_generator::QuestionGeneratorPort,
    question_store::{QuestionStorePort, StoreQuestionRequest, StoredAnswer},
    taxonomy::TaxonomyPort,
    workflow_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowLogger},
};
pub use use_cases::assessment_wizard::AssessmentWizard;
pub use use_cases::error::{ErrorCategory, WorkflowError};
pub use use_cases::generate_questions::GenerationClient;
pub use use_cases::persist_questions::{PersistContext, PersistError, QuestionStore};
pub use use_cases::resolve_mappings::{MappingSpec, ResolveMappingsUseCase};
pub use use_cases::submit_assessment::AssessmentAssembler;
