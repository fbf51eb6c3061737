//! Application-level configuration.
//!
//! - [`WorkflowConfig`]: allocation strictness and question type for a run

pub mod workflow_config;

pub use workflow_config::WorkflowConfig;
