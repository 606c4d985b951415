//! # jxpz Common Library
//!
//! Shared code for the jxpz equipment-build finder:
//! - Known attribute table (codes, display names, format kinds)
//! - Record model and completeness validation
//! - Requirement and optimize-set types
//! - TOML configuration loading
//! - Common error type

pub mod attributes;
pub mod config;
pub mod criteria;
pub mod error;
pub mod record;

pub use attributes::{AttributeKind, AttributeSpec, AttributeTable};
pub use criteria::{OptimizeSet, Requirement};
pub use error::{Error, Result};
pub use record::{Overview, Record, RecordId};
