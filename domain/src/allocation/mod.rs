//! Allocation of stored question ids back onto mapping buckets.
//!
//! The pass walks a cursor over the persisted ids and, for each bucket in
//! order, consumes `question_count` ids. It never backtracks, so it is only
//! correct because generation and persistence both preserve input order.

use crate::mapping::set::MappingSet;
use crate::question::persisted::QuestionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// How to treat a mismatch between bucket demand and available ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    /// Every id must be consumed and every bucket filled
    #[default]
    Strict,
    /// Stop early when ids run out; ignore surplus ids
    Lenient,
}

/// Mismatch detected by a strict allocation pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("mapping buckets demand {expected} questions but {available} ids were persisted")]
    Inconsistent { expected: u64, available: usize },
}

/// Mapping tag attached to one stored question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTag {
    pub mapping_type_id: String,
    pub mapping_value_id: String,
    /// Serialized as `reasons`, the submission boundary's field name
    #[serde(rename = "reasons")]
    pub reason: String,
}

/// Result of an allocation pass.
///
/// Keeps both the id → tags map the submission needs and the bucket index
/// each id was consumed by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionMappingAssociation {
    tags: BTreeMap<QuestionId, Vec<MappingTag>>,
    order: Vec<(QuestionId, usize)>,
}

impl QuestionMappingAssociation {
    fn tag(&mut self, id: &QuestionId, bucket: usize, tag: MappingTag) {
        self.tags.entry(id.clone()).or_default().push(tag);
        self.order.push((id.clone(), bucket));
    }

    /// Tags for one question id
    pub fn get(&self, id: &QuestionId) -> Option<&[MappingTag]> {
        self.tags.get(id).map(Vec::as_slice)
    }

    /// `(id, bucket index)` pairs in consumption order
    pub fn allocations(&self) -> &[(QuestionId, usize)] {
        &self.order
    }

    /// Ids consumed by the given bucket, in order
    pub fn ids_for_bucket(&self, bucket: usize) -> Vec<&QuestionId> {
        self.order
            .iter()
            .filter(|(_, b)| *b == bucket)
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of ids consumed
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The id → tags map keyed by id string, as submitted
    pub fn to_submission_map(&self) -> BTreeMap<String, Vec<MappingTag>> {
        self.tags
            .iter()
            .map(|(id, tags)| (id.to_string(), tags.clone()))
            .collect()
    }
}

/// Re-associate persisted ids with the buckets that produced them.
pub fn build_associations(
    mapping_set: &MappingSet,
    persisted_ids: &[QuestionId],
    mode: AllocationMode,
) -> Result<QuestionMappingAssociation, AllocationError> {
    let expected = mapping_set.aggregates().total_question_count;
    if mode == AllocationMode::Strict && expected != persisted_ids.len() as u64 {
        return Err(AllocationError::Inconsistent {
            expected,
            available: persisted_ids.len(),
        });
    }

    let mut association = QuestionMappingAssociation::default();
    let mut cursor = 0usize;

    'buckets: for (bucket, entry) in mapping_set.entries().iter().enumerate() {
        for _ in 0..entry.question_count {
            let Some(id) = persisted_ids.get(cursor) else {
                break 'buckets;
            };
            association.tag(
                id,
                bucket,
                MappingTag {
                    mapping_type_id: entry.type_id.clone(),
                    mapping_value_id: entry.value_id.clone(),
                    reason: entry.reason.clone(),
                },
            );
            cursor += 1;
        }
    }

    Ok(association)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::entry::MappingEntry;

    fn set(counts: &[u32]) -> MappingSet {
        MappingSet::try_from(
            counts
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    MappingEntry::new(format!("t{i}"), "Skill", format!("v{i}"), format!("V{i}"))
                        .with_reason(format!("r{i}"))
                        .with_question_count(*c)
                })
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn ids(range: std::ops::Range<u64>) -> Vec<QuestionId> {
        range.map(QuestionId::from).collect()
    }

    #[test]
    fn test_two_then_three() {
        let assoc = build_associations(&set(&[2, 3]), &ids(1..6), AllocationMode::Strict).unwrap();

        assert_eq!(assoc.len(), 5);
        let bucket0: Vec<_> = assoc.ids_for_bucket(0).into_iter().map(|id| id.to_string()).collect();
        let bucket1: Vec<_> = assoc.ids_for_bucket(1).into_iter().map(|id| id.to_string()).collect();
        assert_eq!(bucket0, vec!["1", "2"]);
        assert_eq!(bucket1, vec!["3", "4", "5"]);

        let tags = assoc.get(&QuestionId::from(3u64)).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].mapping_type_id, "t1");
        assert_eq!(tags[0].mapping_value_id, "v1");
        assert_eq!(tags[0].reason, "r1");
    }

    #[test]
    fn test_allocation_order_preserved() {
        let assoc = build_associations(&set(&[1, 1, 1]), &ids(7..10), AllocationMode::Strict).unwrap();
        let order: Vec<_> = assoc
            .allocations()
            .iter()
            .map(|(id, bucket)| (id.to_string(), *bucket))
            .collect();
        assert_eq!(
            order,
            vec![("7".to_string(), 0), ("8".to_string(), 1), ("9".to_string(), 2)]
        );
    }

    #[test]
    fn test_strict_rejects_shortfall() {
        let err = build_associations(&set(&[2, 3]), &ids(1..4), AllocationMode::Strict).unwrap_err();
        assert_eq!(err, AllocationError::Inconsistent { expected: 5, available: 3 });
    }

    #[test]
    fn test_strict_rejects_surplus() {
        let err = build_associations(&set(&[1]), &ids(1..3), AllocationMode::Strict).unwrap_err();
        assert_eq!(err, AllocationError::Inconsistent { expected: 1, available: 2 });
    }

    #[test]
    fn test_lenient_stops_early() {
        let assoc = build_associations(&set(&[2, 3]), &ids(1..4), AllocationMode::Lenient).unwrap();
        assert_eq!(assoc.len(), 3);
        assert_eq!(assoc.ids_for_bucket(0).len(), 2);
        assert_eq!(assoc.ids_for_bucket(1).len(), 1);
    }

    #[test]
    fn test_lenient_ignores_surplus() {
        let assoc = build_associations(&set(&[1]), &ids(1..4), AllocationMode::Lenient).unwrap();
        assert_eq!(assoc.len(), 1);
        assert!(assoc.get(&QuestionId::from(2u64)).is_none());
    }

    #[test]
    fn test_submission_map_uses_reasons_field() {
        let assoc = build_associations(&set(&[1]), &ids(42..43), AllocationMode::Strict).unwrap();
        let json = serde_json::to_value(assoc.to_submission_map()).unwrap();
        assert_eq!(json["42"][0]["mapping_type_id"], "t0");
        assert_eq!(json["42"][0]["reasons"], "r0");
    }
}
