//! Plan file loader

use assessgen_application::MappingSpec;
use assessgen_domain::{AssessmentSettings, GenerationContext};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a plan file
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("failed to read plan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid plan: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("plan has no [[mappings]] entries")]
    NoMappings,
}

/// Parsed plan: settings, generation context and mapping specs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssessmentPlan {
    #[serde(rename = "assessment")]
    pub settings: AssessmentSettings,
    pub context: GenerationContext,
    pub mappings: Vec<MappingSpec>,
}

pub struct PlanLoader;

impl PlanLoader {
    pub fn load(path: &Path) -> Result<AssessmentPlan, PlanError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded plan from {}", path.display());
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<AssessmentPlan, PlanError> {
        let plan: AssessmentPlan = toml::from_str(content)?;
        if plan.mappings.is_empty() {
            return Err(PlanError::NoMappings);
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"
[assessment]
title = "Backend screening"
description = "Rust and networking fundamentals"

[assessment.timing]
duration_minutes = 45
starts_at = "2026-03-01T09:00:00Z"

[assessment.display_flags]
shuffle_answers = true

[context]
job_role = "Backend Engineer"
skills = ["Rust", "PostgreSQL"]
experience_level = "senior"

[[mappings]]
type = "Technical Skills"
value = "Rust"
questions = 2
marks = 2

[[mappings]]
type_id = "t-know"
value_id = "v-net"
type = "Domain Knowledge"
reason = "Services talk over gRPC"
"#;

    #[test]
    fn test_parse_full_plan() {
        let plan = PlanLoader::parse(PLAN).unwrap();

        assert_eq!(plan.settings.title, "Backend screening");
        assert_eq!(plan.settings.timing.duration_minutes, Some(45));
        assert!(plan.settings.timing.starts_at.is_some());
        assert!(plan.settings.display_flags.shuffle_answers);
        assert!(plan.settings.display_flags.show_results);

        assert_eq!(plan.context.job_role, "Backend Engineer");
        assert_eq!(plan.context.skills.len(), 2);

        assert_eq!(plan.mappings.len(), 2);
        assert_eq!(plan.mappings[0].type_name, "Technical Skills");
        assert_eq!(plan.mappings[0].question_count, 2);
        assert_eq!(plan.mappings[0].marks, 2);
        assert_eq!(plan.mappings[1].type_id.as_deref(), Some("t-know"));
        assert_eq!(plan.mappings[1].question_count, 1);
        assert_eq!(plan.mappings[1].reason.as_deref(), Some("Services talk over gRPC"));
    }

    #[test]
    fn test_plan_without_mappings_is_rejected() {
        let err = PlanLoader::parse("[assessment]\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, PlanError::NoMappings));
    }

    #[test]
    fn test_malformed_plan() {
        let err = PlanLoader::parse("[[mappings]]\nquestions = \"two\"\n").unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlanLoader::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PlanError::Io { .. }));
    }
}
