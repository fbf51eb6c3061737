//! Backend configuration from TOML (`[api]` section)

use serde::{Deserialize, Serialize};

/// Raw API configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,
    /// Bearer token sent with every request
    pub auth_token: Option<String>,
    /// Per-request timeout
    pub timeout_seconds: u64,
    pub generate_path: String,
    pub question_path: String,
    pub assessment_path: String,
    /// Type list; values are read from `{taxonomy_path}/{type_id}/values`
    pub taxonomy_path: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            timeout_seconds: 60,
            generate_path: "/api/questions/generate".to_string(),
            question_path: "/api/questions".to_string(),
            assessment_path: "/api/assessments".to_string(),
            taxonomy_path: "/api/taxonomy/types".to_string(),
        }
    }
}
