//! The assessment record a workflow run produces.

pub mod draft;
pub mod run_id;
pub mod settings;
pub mod submission;
