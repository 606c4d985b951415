//! Known attribute table
//!
//! The ordered list of attribute codes every scored record must carry, with
//! the display name and format kind used by the rendering boundary. Validation
//! and filtering only ever look at the codes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Error, Result};

/// Suffix marking percent-scaled attribute codes (values are fractions).
pub const PERCENT_SUFFIX: &str = "Percent";

/// How an attribute value is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Plain number (e.g. attack, overcome)
    Flat,
    /// Fraction shown as a percentage (0.15 => 15.00%)
    Percent,
}

impl AttributeKind {
    /// Derive the kind from the code naming convention
    pub fn from_code(code: &str) -> Self {
        if code.ends_with(PERCENT_SUFFIX) {
            AttributeKind::Percent
        } else {
            AttributeKind::Flat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Flat => "flat",
            AttributeKind::Percent => "percent",
        }
    }
}

/// One known attribute: code, display name and format kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Attribute code as it appears in `overview.attrs`
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Presentation kind
    pub kind: AttributeKind,
}

impl AttributeSpec {
    /// Build a spec whose kind follows the `Percent` suffix convention
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let kind = AttributeKind::from_code(&code);
        Self {
            code,
            name: name.into(),
            kind,
        }
    }
}

/// Ordered attribute vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTable {
    specs: Vec<AttributeSpec>,
}

impl AttributeTable {
    /// Create a table from an ordered list of specs
    ///
    /// Rejects empty tables and duplicate codes.
    pub fn new(specs: Vec<AttributeSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::InvalidInput(
                "attribute table must contain at least one attribute".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.code.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate attribute code: {}",
                    spec.code
                )));
            }
        }

        Ok(Self { specs })
    }

    /// Attribute table for the jx3box "origin" client
    pub fn jx3_origin() -> Self {
        Self {
            specs: vec![
                AttributeSpec::new("attack", "面板攻击"),
                AttributeSpec::new("hitPercent", "命中"),
                AttributeSpec::new("strainPercent", "无双"),
                AttributeSpec::new("critialPercent", "会心"),
                AttributeSpec::new("criticalDamagePercent", "会效"),
                AttributeSpec::new("overcome", "破防"),
                AttributeSpec::new("toughnessPercent", "御劲"),
                AttributeSpec::new("decriticalDamagePercent", "化劲"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.code.as_str())
    }

    pub fn get(&self, code: &str) -> Option<&AttributeSpec> {
        self.specs.iter().find(|s| s.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Kind of a code; unknown codes fall back to the naming convention
    pub fn kind_of(&self, code: &str) -> AttributeKind {
        self.get(code)
            .map(|s| s.kind)
            .unwrap_or_else(|| AttributeKind::from_code(code))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self::jx3_origin()
    }
}
