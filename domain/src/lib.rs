//! Domain layer for assessgen
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Mapping buckets
//!
//! A [`MappingSet`] is an ordered list of taxonomy type/value buckets, each
//! asking for a number of generated questions. Totals are recomputed on
//! every read.
//!
//! ## Drafts and durable ids
//!
//! Generated [`DraftQuestion`]s are stored one by one; each acknowledged
//! draft becomes a [`PersistedQuestion`]. Order is preserved end to end so
//! that [`build_associations`] can hand ids back to their buckets by walking
//! cumulative counts.
//!
//! ## Wizard
//!
//! [`WorkflowRun`] owns the state of one pass through the
//! ReviewMapping → ConfigureSettings → Summary steps.

pub mod allocation;
pub mod assessment;
pub mod config;
pub mod core;
pub mod generation;
pub mod mapping;
pub mod question;
pub mod taxonomy;
pub mod wizard;

// Re-export commonly used types
pub use allocation::{
    AllocationError, AllocationMode, MappingTag, QuestionMappingAssociation, build_associations,
};
pub use assessment::{
    draft::AssessmentDraft,
    run_id::WorkflowRunId,
    settings::{AssessmentSettings, DisplayFlags, Timing},
    submission::{SubmissionAck, SubmissionPayload},
};
pub use config::OutputFormat;
pub use crate::core::error::DomainError;
pub use generation::{GenerationContext, GenerationRequest, QuestionType};
pub use mapping::{
    category::DomainCategory,
    entry::{MappingEntry, MappingUpdate},
    set::{MappingAggregates, MappingSet},
};
pub use question::{
    draft::{DraftQuestion, fill_mapping_labels},
    parsing::{ParseError, parse_generation_response},
    persisted::{PersistedQuestion, QuestionId, join_ids},
};
pub use taxonomy::{TaxonomyType, TaxonomyValue};
pub use wizard::{
    run::{WizardError, WorkflowRun},
    step::{WizardStep, WorkflowStatus},
    validation::{ValidationIssue, describe_issues},
};
