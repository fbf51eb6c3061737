//! Mapping set aggregate

use super::entry::{MappingEntry, MappingUpdate};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Totals derived from a [`MappingSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MappingAggregates {
    /// Σ question_count
    pub total_question_count: u64,
    /// Σ (question_count × marks)
    pub total_marks: u64,
}

/// Non-empty, ordered list of mapping buckets.
///
/// Bucket order is significant: the n-th generated question belongs to the
/// bucket reached by walking cumulative `question_count` from the front.
/// Aggregates are computed on every call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MappingEntry>", into = "Vec<MappingEntry>")]
pub struct MappingSet {
    entries: Vec<MappingEntry>,
}

impl Default for MappingSet {
    fn default() -> Self {
        Self {
            entries: vec![MappingEntry::default()],
        }
    }
}

impl TryFrom<Vec<MappingEntry>> for MappingSet {
    type Error = DomainError;

    fn try_from(entries: Vec<MappingEntry>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(DomainError::EmptyMappingSet);
        }
        if entries.iter().any(|e| e.question_count == 0) {
            return Err(DomainError::InvalidQuestionCount);
        }
        Ok(Self { entries })
    }
}

impl From<MappingSet> for Vec<MappingEntry> {
    fn from(set: MappingSet) -> Self {
        set.entries
    }
}

impl MappingSet {
    /// A set holding one default (unselected) entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a default entry
    pub fn add(&mut self) {
        self.entries.push(MappingEntry::default());
    }

    /// Append a prepared entry
    pub fn push(&mut self, entry: MappingEntry) -> Result<(), DomainError> {
        if entry.question_count == 0 {
            return Err(DomainError::InvalidQuestionCount);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the entry at `index`.
    ///
    /// Removing the only remaining entry is a no-op and returns `Ok(false)`.
    pub fn remove(&mut self, index: usize) -> Result<bool, DomainError> {
        self.check_index(index)?;
        if self.entries.len() == 1 {
            return Ok(false);
        }
        self.entries.remove(index);
        Ok(true)
    }

    /// Apply a field edit to the entry at `index`
    pub fn update(&mut self, index: usize, update: MappingUpdate) -> Result<(), DomainError> {
        self.check_index(index)?;
        self.entries[index].apply(update)
    }

    /// Recompute totals from the current entries
    pub fn aggregates(&self) -> MappingAggregates {
        self.entries
            .iter()
            .fold(MappingAggregates::default(), |mut acc, entry| {
                acc.total_question_count += u64::from(entry.question_count);
                acc.total_marks += entry.total_marks();
                acc
            })
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&MappingEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the bucket the `position`-th generated question falls into,
    /// walking cumulative `question_count`.
    pub fn bucket_for(&self, position: usize) -> Option<usize> {
        let mut upper = 0usize;
        for (index, entry) in self.entries.iter().enumerate() {
            upper += entry.question_count as usize;
            if position < upper {
                return Some(index);
            }
        }
        None
    }

    /// Indices of entries that are missing a type or value selection
    pub fn unselected(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.entries.len() {
            return Err(DomainError::MappingIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bucket_set() -> MappingSet {
        MappingSet::try_from(vec![
            MappingEntry::new("t1", "Skill", "v1", "X").with_question_count(2),
            MappingEntry::new("t2", "Knowledge", "v2", "Y").with_question_count(3),
        ])
        .unwrap()
    }

    fn assert_invariants(set: &MappingSet) {
        let agg = set.aggregates();
        let count: u64 = set.entries().iter().map(|e| u64::from(e.question_count)).sum();
        let marks: u64 = set
            .entries()
            .iter()
            .map(|e| u64::from(e.question_count) * u64::from(e.marks))
            .sum();
        assert_eq!(agg.total_question_count, count);
        assert_eq!(agg.total_marks, marks);
    }

    #[test]
    fn test_default_has_one_entry() {
        let set = MappingSet::new();
        assert_eq!(set.len(), 1);
        assert_eq!(set.aggregates().total_question_count, 1);
        assert_eq!(set.aggregates().total_marks, 1);
    }

    #[test]
    fn test_remove_last_entry_is_noop() {
        let mut set = MappingSet::new();
        assert!(!set.remove(0).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut set = two_bucket_set();
        let err = set.remove(5).unwrap_err();
        assert_eq!(err, DomainError::MappingIndexOutOfRange { index: 5, len: 2 });
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_aggregates_track_every_mutation() {
        let mut set = two_bucket_set();
        assert_invariants(&set);
        assert_eq!(set.aggregates().total_question_count, 5);

        set.update(1, MappingUpdate::Marks(4)).unwrap();
        assert_invariants(&set);
        assert_eq!(set.aggregates().total_marks, 2 + 12);

        set.update(1, MappingUpdate::QuestionCount(1)).unwrap();
        assert_invariants(&set);
        assert_eq!(set.aggregates().total_marks, 3);

        set.add();
        assert_invariants(&set);
        assert_eq!(set.aggregates().total_question_count, 4);

        assert!(set.remove(0).unwrap());
        assert_invariants(&set);
        assert_eq!(set.aggregates().total_question_count, 2);
    }

    #[test]
    fn test_update_type_clears_value() {
        let mut set = two_bucket_set();
        set.update(
            0,
            MappingUpdate::Type {
                id: "t3".to_string(),
                name: "Task".to_string(),
            },
        )
        .unwrap();
        let entry = set.get(0).unwrap();
        assert!(entry.value_id.is_empty());
        assert!(entry.value_name.is_empty());
        assert!(entry.reason.is_empty());
        assert_eq!(set.unselected(), vec![0]);
    }

    #[test]
    fn test_bucket_for_walks_cumulative_counts() {
        let set = two_bucket_set();
        assert_eq!(set.bucket_for(0), Some(0));
        assert_eq!(set.bucket_for(1), Some(0));
        assert_eq!(set.bucket_for(2), Some(1));
        assert_eq!(set.bucket_for(4), Some(1));
        assert_eq!(set.bucket_for(5), None);
    }

    #[test]
    fn test_empty_vec_rejected() {
        assert_eq!(
            MappingSet::try_from(Vec::new()).unwrap_err(),
            DomainError::EmptyMappingSet
        );
    }

    #[test]
    fn test_deserialize_rejects_empty_list() {
        let result: Result<MappingSet, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
