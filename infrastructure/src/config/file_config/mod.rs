//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod allocation;
mod api;
mod generation;
mod logging;
mod output;

pub use allocation::FileAllocationConfig;
pub use api::FileApiConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use assessgen_application::WorkflowConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("api.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend endpoints and credentials
    pub api: FileApiConfig,
    /// Generation request settings
    pub generation: FileGenerationConfig,
    /// Id-to-bucket allocation settings
    pub allocation: FileAllocationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file locations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        Ok(())
    }

    /// Workflow settings derived from `[generation]` and `[allocation]`
    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig::from_strict(self.allocation.strict)
            .with_question_type(self.generation.question_type)
    }
}
