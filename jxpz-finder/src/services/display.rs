//! Display boundary
//!
//! Converts between what a person types or reads and the record scale used by
//! the core: percent-kind thresholds arrive in percent and are divided by 100,
//! and percent-kind values are rendered as `xx.xx%`.

use jxpz_common::{AttributeKind, AttributeTable, Record, RecordId, Requirement};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Units of incoming requirement values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// Percent-kind values are given in percent (15 => 0.15)
    #[default]
    Display,
    /// Values already use the record scale
    Raw,
}

/// One rendered attribute line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeView {
    pub code: String,
    pub name: String,
    pub value: f64,
    pub display: String,
}

/// Rendered record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView {
    pub id: Option<RecordId>,
    pub title: String,
    /// View page, only when the record carries an id
    pub link: Option<String>,
    pub score: Option<f64>,
    pub attributes: Vec<AttributeView>,
}

/// Format a value the way it is shown to users
pub fn format_value(value: f64, kind: AttributeKind) -> String {
    match kind {
        AttributeKind::Flat => value.to_string(),
        AttributeKind::Percent => format!("{:.2}%", value * 100.0),
    }
}

/// Render a record in table order
pub fn render_record(record: &Record, table: &AttributeTable, view_url_base: &str) -> RecordView {
    let attributes = table
        .iter()
        .filter_map(|spec| {
            record.attr(&spec.code).map(|value| AttributeView {
                code: spec.code.clone(),
                name: spec.name.clone(),
                value,
                display: format_value(value, spec.kind),
            })
        })
        .collect();

    RecordView {
        id: record.id.clone(),
        title: record.title.clone(),
        link: record
            .id
            .as_ref()
            .map(|id| format!("{}{}", view_url_base, id)),
        score: record.overview.score,
        attributes,
    }
}

/// Build a requirement from form-style input
///
/// Numbers and numeric strings are accepted; blank, non-numeric or non-finite
/// entries are skipped. With [`Units::Display`], percent-kind codes are
/// converted to fractions.
pub fn requirement_from_input(
    input: &BTreeMap<String, Value>,
    units: Units,
    table: &AttributeTable,
) -> Requirement {
    input
        .iter()
        .filter_map(|(code, value)| {
            let number = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|n| n.is_finite())?;

            let number = match (units, table.kind_of(code)) {
                (Units::Display, AttributeKind::Percent) => number / 100.0,
                _ => number,
            };
            Some((code.clone(), number))
        })
        .collect()
}
