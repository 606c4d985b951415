//! Record completeness validation
//!
//! A record is scoreable only when every known attribute code maps to a
//! finite number. Validation runs once, right after decoding; everything
//! downstream assumes valid records.

use jxpz_common::{AttributeTable, Record};
use serde_json::Value;

/// Validates records against a known attribute table
#[derive(Debug, Clone)]
pub struct RecordValidator {
    table: AttributeTable,
}

impl RecordValidator {
    pub fn new(table: AttributeTable) -> Self {
        Self { table }
    }

    /// True iff every known code resolves to a finite value
    pub fn is_valid(&self, record: &Record) -> bool {
        self.table
            .codes()
            .all(|code| record.attr(code).is_some_and(f64::is_finite))
    }

    /// Decode raw list items and keep the valid ones
    ///
    /// Items that do not decode as records count as malformed and are dropped
    /// like any other invalid record.
    pub fn decode_valid(&self, raw: Vec<Value>) -> Vec<Record> {
        raw.into_iter()
            .filter_map(|item| match Record::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(error = %e, "Dropping undecodable catalog item");
                    None
                }
            })
            .filter(|record| {
                let valid = self.is_valid(record);
                if !valid {
                    tracing::debug!(id = ?record.id, "Dropping incomplete record");
                }
                valid
            })
            .collect()
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(AttributeTable::default())
    }
}
