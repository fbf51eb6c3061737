//! Mapping resolution
//!
//! Turns mapping specs written by name (as in a plan file) into fully
//! identified [`MappingEntry`] values using the taxonomy lookup service.
//! Specs that already carry both ids and both names are taken as-is; an
//! id without its name is completed from the taxonomy lists.

use super::error::WorkflowError;
use crate::ports::taxonomy::TaxonomyPort;
use assessgen_domain::taxonomy::find_by_name;
use assessgen_domain::{
    MappingEntry, MappingSet, TaxonomyType, TaxonomyValue, ValidationIssue,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

fn default_count() -> u32 {
    1
}

/// One mapping bucket as written by the author
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MappingSpec {
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default, rename = "value")]
    pub value_name: String,
    #[serde(default)]
    pub value_id: Option<String>,
    /// Overrides the reason carried by the taxonomy value
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default = "default_count", alias = "questions")]
    pub question_count: u32,
    #[serde(default = "default_count")]
    pub marks: u32,
}

impl MappingSpec {
    pub fn by_name(type_name: impl Into<String>, value_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value_name: value_name.into(),
            question_count: 1,
            marks: 1,
            ..Self::default()
        }
    }

    pub fn with_question_count(mut self, count: u32) -> Self {
        self.question_count = count;
        self
    }

    fn has_names(&self) -> bool {
        !self.type_name.trim().is_empty() && !self.value_name.trim().is_empty()
    }

    fn into_entry(
        self,
        (type_id, type_name): (String, String),
        (value_id, value_name): (String, String),
        reason: Option<String>,
    ) -> MappingEntry {
        MappingEntry::new(type_id, type_name, value_id, value_name)
            .with_reason(self.reason.or(reason).unwrap_or_default())
            .with_question_count(self.question_count)
            .with_marks(self.marks)
    }
}

/// Resolves [`MappingSpec`]s against the taxonomy service
pub struct ResolveMappingsUseCase {
    taxonomy: Arc<dyn TaxonomyPort>,
}

impl ResolveMappingsUseCase {
    pub fn new(taxonomy: Arc<dyn TaxonomyPort>) -> Self {
        Self { taxonomy }
    }

    /// Resolve every spec; all unknown names are reported together.
    pub async fn execute(&self, specs: Vec<MappingSpec>) -> Result<MappingSet, WorkflowError> {
        if specs.is_empty() {
            return Err(assessgen_domain::DomainError::EmptyMappingSet.into());
        }

        let mut types: Option<Vec<TaxonomyType>> = None;
        let mut values: HashMap<String, Vec<TaxonomyValue>> = HashMap::new();
        let mut entries = Vec::with_capacity(specs.len());
        let mut issues = Vec::new();

        for (index, spec) in specs.into_iter().enumerate() {
            if spec.question_count == 0 {
                return Err(assessgen_domain::DomainError::InvalidQuestionCount.into());
            }

            if let (Some(type_id), Some(value_id)) = (&spec.type_id, &spec.value_id)
                && spec.has_names()
            {
                debug!("Mapping {} given by id ({}/{})", index, type_id, value_id);
                let taxonomy_type = (type_id.clone(), spec.type_name.clone());
                let value = (value_id.clone(), spec.value_name.clone());
                entries.push(spec.into_entry(taxonomy_type, value, None));
                continue;
            }

            if types.is_none() {
                types = Some(self.taxonomy.list_types().await.map_err(taxonomy_failed)?);
            }
            let known = types.as_deref().unwrap_or_default();
            let found = match &spec.type_id {
                Some(id) => known.iter().find(|t| &t.id == id),
                None => find_by_name(known, &spec.type_name, |t| t.name.as_str()),
            };
            let Some(taxonomy_type) = found.map(|t| (t.id.clone(), t.name.clone())) else {
                issues.push(ValidationIssue::UnknownTaxonomy {
                    index,
                    name: spec.type_id.clone().unwrap_or_else(|| spec.type_name.clone()),
                });
                continue;
            };

            let type_id = taxonomy_type.0.clone();
            if !values.contains_key(&type_id) {
                let listed = self
                    .taxonomy
                    .list_values(&type_id)
                    .await
                    .map_err(taxonomy_failed)?;
                values.insert(type_id.clone(), listed);
            }
            let known = values.get(&type_id).map(Vec::as_slice).unwrap_or_default();
            let found = match &spec.value_id {
                Some(id) => known.iter().find(|v| &v.id == id),
                None => find_by_name(known, &spec.value_name, |v| v.name.as_str()),
            };
            let Some((value, reason)) =
                found.map(|v| ((v.id.clone(), v.name.clone()), v.reason.clone()))
            else {
                issues.push(ValidationIssue::UnknownTaxonomy {
                    index,
                    name: spec.value_id.clone().unwrap_or_else(|| spec.value_name.clone()),
                });
                continue;
            };

            entries.push(spec.into_entry(taxonomy_type, value, reason));
        }

        if !issues.is_empty() {
            return Err(WorkflowError::ValidationFailed(issues));
        }

        info!("Resolved {} mappings", entries.len());
        Ok(MappingSet::try_from(entries)?)
    }
}

fn taxonomy_failed(error: crate::ports::error::GatewayError) -> WorkflowError {
    WorkflowError::TaxonomyFailed(error.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::error::GatewayError;
    use assessgen_domain::DomainCategory;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct StaticTaxonomy {
        types: Vec<TaxonomyType>,
        values: HashMap<String, Vec<TaxonomyValue>>,
        value_lookups: Mutex<Vec<String>>,
        fail: bool,
    }

    impl StaticTaxonomy {
        fn new() -> Self {
            let mut values = HashMap::new();
            values.insert(
                "t-skill".to_string(),
                vec![
                    TaxonomyValue::new("v-rust", "Rust").with_reason("Primary service language"),
                    TaxonomyValue::new("v-sql", "SQL"),
                ],
            );
            values.insert(
                "t-know".to_string(),
                vec![TaxonomyValue::new("v-net", "Networking")],
            );
            Self {
                types: vec![
                    TaxonomyType::new("t-skill", "Technical Skills"),
                    TaxonomyType::new("t-know", "Domain Knowledge"),
                ],
                values,
                value_lookups: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl TaxonomyPort for StaticTaxonomy {
        async fn list_types(&self) -> Result<Vec<TaxonomyType>, GatewayError> {
            if self.fail {
                return Err(GatewayError::ConnectionError("refused".to_string()));
            }
            Ok(self.types.clone())
        }

        async fn list_values(&self, type_id: &str) -> Result<Vec<TaxonomyValue>, GatewayError> {
            self.value_lookups.lock().unwrap().push(type_id.to_string());
            Ok(self.values.get(type_id).cloned().unwrap_or_default())
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_resolves_names_and_copies_reason() {
        let taxonomy = Arc::new(StaticTaxonomy::new());
        let use_case = ResolveMappingsUseCase::new(taxonomy.clone());

        let set = use_case
            .execute(vec![
                MappingSpec::by_name("technical skills", "Rust").with_question_count(2),
                MappingSpec::by_name("Technical Skills", "sql"),
                MappingSpec::by_name("Domain Knowledge", "Networking"),
            ])
            .await
            .unwrap();

        assert_eq!(set.len(), 3);
        let first = set.get(0).unwrap();
        assert_eq!(first.type_id, "t-skill");
        assert_eq!(first.value_id, "v-rust");
        assert_eq!(first.reason, "Primary service language");
        assert_eq!(first.domain_category, DomainCategory::Skill);
        assert_eq!(set.get(1).unwrap().reason, "");
        assert_eq!(set.get(2).unwrap().domain_category, DomainCategory::Knowledge);
        assert_eq!(set.aggregates().total_question_count, 4);

        // Values are fetched once per type
        assert_eq!(
            *taxonomy.value_lookups.lock().unwrap(),
            vec!["t-skill".to_string(), "t-know".to_string()]
        );
    }

    #[tokio::test]
    async fn test_specs_with_ids_and_names_skip_lookup() {
        let taxonomy = Arc::new(StaticTaxonomy::failing());
        let use_case = ResolveMappingsUseCase::new(taxonomy.clone());

        let set = use_case
            .execute(vec![MappingSpec {
                type_id: Some("t-skill".to_string()),
                value_id: Some("v-rust".to_string()),
                reason: Some("Set by author".to_string()),
                ..MappingSpec::by_name("Skill", "Rust")
            }])
            .await
            .unwrap();

        let entry = set.get(0).unwrap();
        assert_eq!(entry.value_name, "Rust");
        assert_eq!(entry.reason, "Set by author");
        assert!(taxonomy.value_lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_without_names_take_taxonomy_names() {
        let taxonomy = Arc::new(StaticTaxonomy::new());
        let use_case = ResolveMappingsUseCase::new(taxonomy.clone());

        let set = use_case
            .execute(vec![
                MappingSpec {
                    type_id: Some("t-skill".to_string()),
                    value_id: Some("v-rust".to_string()),
                    ..MappingSpec::by_name("", "")
                },
                MappingSpec {
                    type_id: Some("t-know".to_string()),
                    ..MappingSpec::by_name("", "networking")
                },
            ])
            .await
            .unwrap();

        let first = set.get(0).unwrap();
        assert_eq!(first.type_name, "Technical Skills");
        assert_eq!(first.value_name, "Rust");
        assert_eq!(first.reason, "Primary service language");
        assert_eq!(first.domain_category, DomainCategory::Skill);

        let second = set.get(1).unwrap();
        assert_eq!(second.value_id, "v-net");
        assert_eq!(second.domain_category, DomainCategory::Knowledge);
    }

    #[tokio::test]
    async fn test_unknown_id_is_reported() {
        let use_case = ResolveMappingsUseCase::new(Arc::new(StaticTaxonomy::new()));

        let err = use_case
            .execute(vec![MappingSpec {
                type_id: Some("t-skill".to_string()),
                value_id: Some("v-gone".to_string()),
                ..MappingSpec::by_name("", "")
            }])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WorkflowError::ValidationFailed(vec![ValidationIssue::UnknownTaxonomy {
                index: 0,
                name: "v-gone".to_string()
            }])
        );
    }

    #[tokio::test]
    async fn test_unknown_names_are_reported_together() {
        let use_case = ResolveMappingsUseCase::new(Arc::new(StaticTaxonomy::new()));

        let err = use_case
            .execute(vec![
                MappingSpec::by_name("Astrology", "Tarot"),
                MappingSpec::by_name("Technical Skills", "Rust"),
                MappingSpec::by_name("Technical Skills", "COBOL"),
            ])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WorkflowError::ValidationFailed(vec![
                ValidationIssue::UnknownTaxonomy {
                    index: 0,
                    name: "Astrology".to_string()
                },
                ValidationIssue::UnknownTaxonomy {
                    index: 2,
                    name: "COBOL".to_string()
                },
            ])
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_taxonomy_error() {
        let use_case = ResolveMappingsUseCase::new(Arc::new(StaticTaxonomy::failing()));

        let err = use_case
            .execute(vec![MappingSpec::by_name("Technical Skills", "Rust")])
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::TaxonomyFailed(_)));
    }

    #[tokio::test]
    async fn test_empty_specs_rejected() {
        let use_case = ResolveMappingsUseCase::new(Arc::new(StaticTaxonomy::new()));
        assert!(matches!(
            use_case.execute(vec![]).await,
            Err(WorkflowError::Mapping(_))
        ));
    }

    #[test]
    fn test_spec_deserializes_plan_keys() {
        let spec: MappingSpec = serde_json::from_value(serde_json::json!({
            "type": "Technical Skills",
            "value": "Rust",
            "questions": 3
        }))
        .unwrap();
        assert_eq!(spec.question_count, 3);
        assert_eq!(spec.marks, 1);
        assert!(spec.type_id.is_none());
    }
}
