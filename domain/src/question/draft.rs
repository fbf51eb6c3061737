//! Draft question entity

use crate::core::string::is_blank;
use crate::mapping::category::DomainCategory;
use crate::mapping::entry::MappingEntry;
use crate::mapping::set::MappingSet;
use serde::{Deserialize, Serialize};

/// An AI-generated candidate question, not yet stored.
///
/// Drafts live only for the duration of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub title: String,
    pub answer_options: Vec<String>,
    pub correct_answer_index: usize,
    pub mapping_type_name: String,
    pub mapping_value_name: String,
    pub reason: String,
    pub domain_category: DomainCategory,
    /// The skill or item the question was drawn from
    pub source_item: String,
}

impl DraftQuestion {
    pub fn new(title: impl Into<String>, answer_options: Vec<String>, correct_answer_index: usize) -> Self {
        Self {
            title: title.into(),
            answer_options,
            correct_answer_index,
            mapping_type_name: String::new(),
            mapping_value_name: String::new(),
            reason: String::new(),
            domain_category: DomainCategory::Unclassified,
            source_item: String::new(),
        }
    }

    /// The text of the correct option, if the index is in range
    pub fn correct_answer(&self) -> Option<&str> {
        self.answer_options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }

    /// Copy mapping labels from the bucket this draft belongs to, keeping
    /// any labels the generator already supplied.
    pub fn fill_from_entry(&mut self, entry: &MappingEntry) {
        if is_blank(&self.mapping_type_name) {
            self.mapping_type_name = entry.type_name.clone();
        }
        if is_blank(&self.mapping_value_name) {
            self.mapping_value_name = entry.value_name.clone();
        }
        if is_blank(&self.reason) {
            self.reason = entry.reason.clone();
        }
        if self.domain_category == DomainCategory::Unclassified {
            self.domain_category = DomainCategory::classify(&self.mapping_type_name);
        }
        if is_blank(&self.source_item) {
            self.source_item = entry.value_name.clone();
        }
    }
}

/// Back-fill labels on every draft from its bucket by cumulative count.
///
/// Drafts past the last bucket are left untouched.
pub fn fill_mapping_labels(drafts: &mut [DraftQuestion], mapping_set: &MappingSet) {
    for (position, draft) in drafts.iter_mut().enumerate() {
        if let Some(entry) = mapping_set
            .bucket_for(position)
            .and_then(|bucket| mapping_set.get(bucket))
        {
            draft.fill_from_entry(entry);
        }
    }
}
