//! Equipment-build record model
//!
//! Mirrors one entry of the catalog's `data.list` payload. Attribute values
//! are decoded leniently: numbers and numeric strings are kept, anything else
//! is treated as absent so that completeness validation can reject the record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque record identifier (the catalog uses integers, strings are tolerated)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        RecordId::Int(i64::from(id))
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// Scoring summary of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Aggregate equipment score (passed through, never filtered on)
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,
    /// Attribute code => value
    #[serde(default, deserialize_with = "lenient_attrs")]
    pub attrs: BTreeMap<String, f64>,
}

/// One equipment build
///
/// `id` and `title` are passed through untouched by scoring, so a record is
/// never rejected because of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// `None` when the catalog sends no usable identifier
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: Overview,
}

impl Record {
    /// Build a record directly from attribute pairs
    pub fn new<'a>(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        attrs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            overview: Overview {
                score: None,
                attrs: attrs
                    .into_iter()
                    .map(|(code, value)| (code.to_string(), value))
                    .collect(),
            },
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.overview.score = Some(score);
        self
    }

    /// Value of an attribute, `None` when the record does not carry it
    pub fn attr(&self, code: &str) -> Option<f64> {
        self.overview.attrs.get(code).copied()
    }

    /// Decode a raw catalog list item
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Some(match n.as_i64() {
            Some(id) => RecordId::Int(id),
            None => RecordId::Text(n.to_string()),
        }),
        Some(Value::String(s)) => Some(RecordId::Text(s)),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_attrs<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(code, value)| number_from_value(&value).map(|v| (code, v)))
        .collect())
}
