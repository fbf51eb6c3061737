//! Competency domain classification for taxonomy types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Competency domain a taxonomy type belongs to.
///
/// Derived from the type's display name; never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainCategory {
    Behaviour,
    Attitude,
    Ability,
    Knowledge,
    Skill,
    Task,
    /// Type name matched none of the known keywords (or is empty)
    #[default]
    Unclassified,
}

impl DomainCategory {
    /// Keyword table, checked in order. The first keyword contained in the
    /// lowercased type name wins.
    const KEYWORDS: &'static [(&'static str, DomainCategory)] = &[
        ("behaviour", DomainCategory::Behaviour),
        ("behavior", DomainCategory::Behaviour),
        ("attitude", DomainCategory::Attitude),
        ("abilit", DomainCategory::Ability),
        ("knowledge", DomainCategory::Knowledge),
        ("skill", DomainCategory::Skill),
        ("task", DomainCategory::Task),
    ];

    /// Classify a taxonomy type name into its competency domain.
    ///
    /// ```
    /// use assessgen_domain::DomainCategory;
    ///
    /// assert_eq!(DomainCategory::classify("Technical Skills"), DomainCategory::Skill);
    /// assert_eq!(DomainCategory::classify("Core Behaviors"), DomainCategory::Behaviour);
    /// assert_eq!(DomainCategory::classify("Misc"), DomainCategory::Unclassified);
    /// ```
    pub fn classify(type_name: &str) -> Self {
        let lowered = type_name.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCategory::Behaviour => "behaviour",
            DomainCategory::Attitude => "attitude",
            DomainCategory::Ability => "ability",
            DomainCategory::Knowledge => "knowledge",
            DomainCategory::Skill => "skill",
            DomainCategory::Task => "task",
            DomainCategory::Unclassified => "unclassified",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DomainCategory::Behaviour => "Behaviour",
            DomainCategory::Attitude => "Attitude",
            DomainCategory::Ability => "Ability",
            DomainCategory::Knowledge => "Knowledge",
            DomainCategory::Skill => "Skill",
            DomainCategory::Task => "Task",
            DomainCategory::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
