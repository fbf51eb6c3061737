//! Generation configuration from TOML (`[generation]` section)

use assessgen_domain::QuestionType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Kind of question requested from the generator
    pub question_type: QuestionType,
}
