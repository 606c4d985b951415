//! Requirement Filter
//!
//! Keeps records whose attributes reach every inclusive minimum of a
//! requirement. Stable: surviving records keep their input order.

use jxpz_common::{Record, Requirement};

/// True iff `record` meets every threshold of `requirement`
///
/// A code the record does not carry fails the threshold.
pub fn meets_requirement(record: &Record, requirement: &Requirement) -> bool {
    requirement
        .iter()
        .all(|(code, min)| record.attr(code).is_some_and(|value| value >= min))
}

/// Records meeting `requirement`, as a new collection
pub fn filter_by_requirement(records: &[Record], requirement: &Requirement) -> Vec<Record> {
    records
        .iter()
        .filter(|record| meets_requirement(record, requirement))
        .cloned()
        .collect()
}
