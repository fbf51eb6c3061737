//! Wizard steps and workflow status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered configuration steps. Linear, no branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ReviewMapping,
    ConfigureSettings,
    Summary,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::ReviewMapping;

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::ReviewMapping => Some(WizardStep::ConfigureSettings),
            WizardStep::ConfigureSettings => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::ReviewMapping => None,
            WizardStep::ConfigureSettings => Some(WizardStep::ReviewMapping),
            WizardStep::Summary => Some(WizardStep::ConfigureSettings),
        }
    }

    /// 1-based position for "Step n of 3" displays
    pub fn position(&self) -> usize {
        match self {
            WizardStep::ReviewMapping => 1,
            WizardStep::ConfigureSettings => 2,
            WizardStep::Summary => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::ReviewMapping => "review_mapping",
            WizardStep::ConfigureSettings => "configure_settings",
            WizardStep::Summary => "summary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::ReviewMapping => "Review Mapping",
            WizardStep::ConfigureSettings => "Configure Settings",
            WizardStep::Summary => "Summary",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where a workflow run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "step")]
pub enum WorkflowStatus {
    Active(WizardStep),
    /// Ended by `skip()`; nothing further is persisted
    Cancelled,
    /// Submission acknowledged
    Persisted,
}

impl WorkflowStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStatus::Cancelled | WorkflowStatus::Persisted)
    }

    pub fn step(&self) -> Option<WizardStep> {
        match self {
            WorkflowStatus::Active(step) => Some(*step),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Active(step) => write!(f, "{step}"),
            WorkflowStatus::Cancelled => write!(f, "Cancelled"),
            WorkflowStatus::Persisted => write!(f, "Persisted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_order() {
        let mut step = WizardStep::FIRST;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            step = next;
            visited.push(step);
        }
        assert_eq!(
            visited,
            vec![WizardStep::ReviewMapping, WizardStep::ConfigureSettings, WizardStep::Summary]
        );
        assert_eq!(WizardStep::ReviewMapping.previous(), None);
        assert_eq!(WizardStep::Summary.previous(), Some(WizardStep::ConfigureSettings));
    }

    #[test]
    fn test_terminal_status() {
        assert!(WorkflowStatus::Cancelled.is_terminal());
        assert!(WorkflowStatus::Persisted.is_terminal());
        assert!(!WorkflowStatus::Active(WizardStep::Summary).is_terminal());
        assert_eq!(WorkflowStatus::Persisted.step(), None);
    }
}
