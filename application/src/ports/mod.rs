//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod assessment_store;
pub mod error;
pub mod progress;
pub mod question_generator;
pub mod question_store;
pub mod taxonomy;
pub mod workflow_logger;
