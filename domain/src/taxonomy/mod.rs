//! Taxonomy vocabulary value objects
//!
//! Types and values come from an external lookup service; the domain only
//! needs their ids, names and the optional reason text a value carries.

use crate::mapping::category::DomainCategory;
use serde::{Deserialize, Serialize};

/// A taxonomy type (e.g. "Technical Skills")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyType {
    pub id: String,
    pub name: String,
}

impl TaxonomyType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn category(&self) -> DomainCategory {
        DomainCategory::classify(&self.name)
    }
}

/// A value within a taxonomy type (e.g. "Rust" under "Technical Skills")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyValue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl TaxonomyValue {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Case-insensitive lookup by display name
pub fn find_by_name<'a, T, F>(items: &'a [T], name: &str, name_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    let wanted = name.trim();
    items
        .iter()
        .find(|item| name_of(item).trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_category() {
        assert_eq!(
            TaxonomyType::new("1", "Soft Skills").category(),
            DomainCategory::Skill
        );
    }

    #[test]
    fn test_find_by_name_ignores_case_and_whitespace() {
        let values = vec![
            TaxonomyValue::new("a", "Rust"),
            TaxonomyValue::new("b", "Go").with_reason("Backend services"),
        ];
        let found = find_by_name(&values, " go ", |v| &v.name).unwrap();
        assert_eq!(found.id, "b");
        assert_eq!(found.reason.as_deref(), Some("Backend services"));
        assert!(find_by_name(&values, "Python", |v| &v.name).is_none());
    }

    #[test]
    fn test_value_reason_is_optional_in_json() {
        let value: TaxonomyValue = serde_json::from_str(r#"{"id":"7","name":"SQL"}"#).unwrap();
        assert!(value.reason.is_none());
    }
}
