//! Taxonomy mapping buckets.
//!
//! - [`entry::MappingEntry`]: one type/value bucket with count and marks
//! - [`set::MappingSet`]: the ordered, non-empty bucket list and its totals
//! - [`category::DomainCategory`]: competency domain derived from the type name

pub mod category;
pub mod entry;
pub mod set;
