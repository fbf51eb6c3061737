//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assessment_wizard;
pub mod error;
pub mod generate_questions;
pub mod persist_questions;
pub mod resolve_mappings;
pub mod submit_assessment;
