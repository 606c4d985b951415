//! HTTP API handlers for jxpz-finder

pub mod cache;
pub mod health;
pub mod search;

pub use cache::cache_routes;
pub use health::health_routes;
pub use search::search_routes;
