//! Assessment settings value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When the assessment is open and how long a candidate has
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub duration_minutes: Option<u32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Timing {
    pub fn with_duration(minutes: u32) -> Self {
        Self {
            duration_minutes: Some(minutes),
            ..Self::default()
        }
    }

    /// False only when both ends are set and the window is empty or inverted
    pub fn window_is_valid(&self) -> bool {
        match (self.starts_at, self.ends_at) {
            (Some(start), Some(end)) => end > start,
            _ => true,
        }
    }
}

/// Candidate-facing presentation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFlags {
    pub shuffle_questions: bool,
    pub shuffle_answers: bool,
    pub show_results: bool,
    pub allow_back_navigation: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            shuffle_questions: false,
            shuffle_answers: false,
            show_results: true,
            allow_back_navigation: true,
        }
    }
}

/// Everything the settings step edits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentSettings {
    pub title: String,
    pub description: String,
    pub timing: Timing,
    pub display_flags: DisplayFlags,
}

impl AssessmentSettings {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_display_flags(mut self, flags: DisplayFlags) -> Self {
        self.display_flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_validity() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();

        let open = Timing {
            starts_at: Some(start),
            ends_at: Some(end),
            ..Timing::default()
        };
        assert!(open.window_is_valid());

        let inverted = Timing {
            starts_at: Some(end),
            ends_at: Some(start),
            ..Timing::default()
        };
        assert!(!inverted.window_is_valid());

        assert!(Timing::with_duration(30).window_is_valid());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: AssessmentSettings =
            serde_json::from_str(r#"{"title":"Rust","display_flags":{"shuffle_answers":true}}"#).unwrap();
        assert_eq!(settings.title, "Rust");
        assert!(settings.description.is_empty());
        assert!(settings.display_flags.shuffle_answers);
        assert!(settings.display_flags.show_results);
    }
}
