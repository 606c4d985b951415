//! Search criteria: minimum thresholds and the attributes to maximize

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attribute code => inclusive minimum
///
/// Values use the record's own scale: percent codes are fractions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirement {
    thresholds: BTreeMap<String, f64>,
}

impl Requirement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a threshold
    pub fn with(mut self, code: impl Into<String>, min: f64) -> Self {
        self.thresholds.insert(code.into(), min);
        self
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.thresholds.get(code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.thresholds.iter().map(|(code, min)| (code.as_str(), *min))
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Requirement {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            thresholds: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Attribute codes to maximize jointly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizeSet {
    codes: BTreeSet<String>,
}

impl OptimizeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<K: Into<String>> FromIterator<K> for OptimizeSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
