//! Mount cache inspection

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// One cached mount
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedMount {
    pub mount: String,
    pub records: usize,
}

/// GET /cache response
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheResponse {
    pub mounts: Vec<CachedMount>,
}

/// GET /cache
pub async fn list_cached_mounts(State(state): State<AppState>) -> Json<CacheResponse> {
    let mounts = state
        .search
        .cache()
        .store()
        .mounts()
        .await
        .into_iter()
        .map(|(mount, records)| CachedMount { mount, records })
        .collect();

    Json(CacheResponse { mounts })
}

pub fn cache_routes() -> Router<AppState> {
    Router::new().route("/cache", get(list_cached_mounts))
}
