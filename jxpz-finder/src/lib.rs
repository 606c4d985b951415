//! jxpz-finder library interface
//!
//! Retrieves equipment-build records per mount from the jx3box catalog,
//! memoizes them for the process lifetime, and answers searches with the
//! requirement-passing Pareto frontier. Exposes public APIs for integration
//! testing.

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult, FetchError};

use axum::Router;
use chrono::{DateTime, Utc};
use jxpz_common::config::TomlConfig;
use jxpz_common::AttributeTable;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::{
    CatalogError, CatalogSource, HttpCatalog, InMemoryStore, MountCache, PageFetcher,
    RecordValidator, SearchService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Cache-backed search pipeline
    pub search: Arc<SearchService>,
    /// Known attribute vocabulary
    pub table: Arc<AttributeTable>,
    /// Prefix for record view links
    pub view_url_base: Arc<str>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        search: SearchService,
        table: AttributeTable,
        view_url_base: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            search: Arc::new(search),
            table: Arc::new(table),
            view_url_base: view_url_base.into(),
            startup_time: Utc::now(),
        }
    }

    /// Wire the pipeline over an arbitrary catalog source
    pub fn with_source(source: Arc<dyn CatalogSource>, config: &TomlConfig) -> Self {
        let table = AttributeTable::jx3_origin();
        let fetcher = PageFetcher::new(source, RecordValidator::new(table.clone()));
        let cache = MountCache::new(fetcher, Arc::new(InMemoryStore::new()))
            .with_single_flight(config.cache.single_flight);

        Self::new(
            SearchService::new(cache),
            table,
            config.catalog.view_url_base.as_str(),
        )
    }

    /// Wire the pipeline over the HTTP catalog described by `config`
    pub fn from_config(config: &TomlConfig) -> Result<Self, CatalogError> {
        let catalog = HttpCatalog::new(config.catalog.clone())?;
        Ok(Self::with_source(Arc::new(catalog), config))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::search_routes())
        .merge(api::cache_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
