//! Output format value object

use serde::{Deserialize, Serialize};

/// How workflow results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary tables (default)
    #[default]
    Summary,
    /// JSON document
    Json,
}
