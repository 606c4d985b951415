//! Search orchestration
//!
//! cache lookup → requirement filter → Pareto engine

use jxpz_common::{OptimizeSet, Record, Requirement};
use tracing::debug;

use super::mount_cache::MountCache;
use super::pareto_engine::{pareto_frontier_with, DominanceKind};
use super::requirement_filter::filter_by_requirement;
use crate::error::FetchError;

/// Runs searches against cached mount records
pub struct SearchService {
    cache: MountCache,
}

impl SearchService {
    pub fn new(cache: MountCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &MountCache {
        &self.cache
    }

    /// Records of `mount` meeting `requirement` that are Pareto-optimal over `optimize`
    pub async fn search(
        &self,
        mount: &str,
        requirement: &Requirement,
        optimize: &OptimizeSet,
    ) -> Result<Vec<Record>, FetchError> {
        self.search_with(mount, requirement, optimize, DominanceKind::default())
            .await
    }

    /// Same as [`search`](Self::search) with an explicit dominance strategy
    pub async fn search_with(
        &self,
        mount: &str,
        requirement: &Requirement,
        optimize: &OptimizeSet,
        dominance: DominanceKind,
    ) -> Result<Vec<Record>, FetchError> {
        let records = self.cache.get_or_fetch(mount).await?;

        let passing = filter_by_requirement(&records, requirement);
        let frontier = pareto_frontier_with(&passing, optimize, dominance.strategy());

        debug!(
            mount = %mount,
            total = records.len(),
            passing = passing.len(),
            frontier = frontier.len(),
            dominance = dominance.as_str(),
            "Search complete"
        );

        Ok(frontier)
    }
}
