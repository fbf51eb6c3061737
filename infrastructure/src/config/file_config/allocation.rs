//! Allocation configuration from TOML (`[allocation]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAllocationConfig {
    /// Reject submissions whose stored ids do not match bucket demand
    pub strict: bool,
}

impl Default for FileAllocationConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}
