//! Pareto Engine
//!
//! Computes the non-dominated subset of records over a set of attributes to
//! maximize. The domination test is a pluggable [`Dominance`] strategy:
//!
//! - [`StrictOnAll`] (default): `r` is dominated by `r2` only if `r2` is
//!   strictly greater on *every* optimized attribute. Ties never dominate.
//! - [`Classic`]: textbook Pareto dominance, `r2` is no worse on every
//!   attribute and strictly better on at least one.
//!
//! Complexity is O(n² · k); per-mount volumes are in the low hundreds.

use jxpz_common::{OptimizeSet, Record};
use serde::{Deserialize, Serialize};

/// Domination predicate
pub trait Dominance: Send + Sync {
    /// True iff `winner` dominates `loser` over `attrs`
    fn dominates(&self, winner: &Record, loser: &Record, attrs: &OptimizeSet) -> bool;
}

/// Strict improvement on all optimized attributes simultaneously
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictOnAll;

impl Dominance for StrictOnAll {
    fn dominates(&self, winner: &Record, loser: &Record, attrs: &OptimizeSet) -> bool {
        !attrs.is_empty()
            && attrs
                .iter()
                .all(|code| match (loser.attr(code), winner.attr(code)) {
                    (Some(l), Some(w)) => l < w,
                    _ => false,
                })
    }
}

/// Textbook Pareto dominance
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl Dominance for Classic {
    fn dominates(&self, winner: &Record, loser: &Record, attrs: &OptimizeSet) -> bool {
        let mut strictly_better = false;
        for code in attrs.iter() {
            let (Some(w), Some(l)) = (winner.attr(code), loser.attr(code)) else {
                return false;
            };
            if w < l {
                return false;
            }
            if w > l {
                strictly_better = true;
            }
        }
        strictly_better
    }
}

/// Selectable dominance strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceKind {
    #[default]
    StrictOnAll,
    Classic,
}

impl DominanceKind {
    pub fn strategy(&self) -> &'static dyn Dominance {
        match self {
            DominanceKind::StrictOnAll => &StrictOnAll,
            DominanceKind::Classic => &Classic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DominanceKind::StrictOnAll => "strict_on_all",
            DominanceKind::Classic => "classic",
        }
    }
}

/// Non-dominated records under the default [`StrictOnAll`] test
pub fn pareto_frontier(records: &[Record], optimize: &OptimizeSet) -> Vec<Record> {
    pareto_frontier_with(records, optimize, &StrictOnAll)
}

/// Non-dominated records under an explicit dominance strategy
///
/// An empty optimize set returns the input unchanged. Input order is kept.
pub fn pareto_frontier_with(
    records: &[Record],
    optimize: &OptimizeSet,
    dominance: &dyn Dominance,
) -> Vec<Record> {
    if optimize.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|candidate| {
            !records
                .iter()
                .any(|other| dominance.dominates(other, candidate, optimize))
        })
        .cloned()
        .collect()
}
