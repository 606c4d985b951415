//! Retrieval and optimization pipeline
//!
//! Record Validator → Page Fetcher → Mount Cache → Requirement Filter → Pareto Engine

pub mod catalog_client;
pub mod display;
pub mod mount_cache;
pub mod page_fetcher;
pub mod pareto_engine;
pub mod record_validator;
pub mod requirement_filter;
pub mod search;

pub use catalog_client::{CatalogError, CatalogSource, HttpCatalog};
pub use display::{render_record, requirement_from_input, RecordView, Units};
pub use mount_cache::{CacheStore, InMemoryStore, MountCache, MountRecords};
pub use page_fetcher::PageFetcher;
pub use pareto_engine::{
    pareto_frontier, pareto_frontier_with, Classic, Dominance, DominanceKind, StrictOnAll,
};
pub use record_validator::RecordValidator;
pub use requirement_filter::{filter_by_requirement, meets_requirement};
pub use search::SearchService;

// ============================================================================
// Mock Catalog for Testing
// ============================================================================
