//! Search and attribute vocabulary endpoints
//!
//! POST /search converts form-style input at the boundary (percent ⇄ fraction),
//! runs the pipeline, and renders the frontier for display.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use jxpz_common::{AttributeSpec, OptimizeSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::services::{render_record, requirement_from_input, DominanceKind, RecordView, Units};
use crate::AppState;

/// POST /search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Mount identifier
    pub mount: String,
    /// Attribute code => minimum, in `units`
    #[serde(default)]
    pub requirement: BTreeMap<String, Value>,
    /// Attribute codes to maximize
    #[serde(default)]
    pub optimize: OptimizeSet,
    #[serde(default)]
    pub dominance: DominanceKind,
    #[serde(default)]
    pub units: Units,
}

/// POST /search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub mount: String,
    pub count: usize,
    pub results: Vec<RecordView>,
}

/// GET /attributes response
#[derive(Debug, Serialize, Deserialize)]
pub struct AttributesResponse {
    pub attributes: Vec<AttributeSpec>,
}

/// POST /search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    let mount = request.mount.trim();
    if mount.is_empty() {
        return Err(ApiError::BadRequest("mount must not be empty".to_string()));
    }

    let requirement = requirement_from_input(&request.requirement, request.units, &state.table);

    let records = state
        .search
        .search_with(mount, &requirement, &request.optimize, request.dominance)
        .await
        .map_err(|e| {
            warn!(mount = %mount, error = %e, "Search failed");
            ApiError::from(e)
        })?;

    info!(
        mount = %mount,
        requirements = requirement.len(),
        optimize = request.optimize.len(),
        results = records.len(),
        "Search served"
    );

    let results: Vec<RecordView> = records
        .iter()
        .map(|record| render_record(record, &state.table, &state.view_url_base))
        .collect();

    Ok(Json(SearchResponse {
        mount: mount.to_string(),
        count: results.len(),
        results,
    }))
}

/// GET /attributes
pub async fn list_attributes(State(state): State<AppState>) -> Json<AttributesResponse> {
    Json(AttributesResponse {
        attributes: state.table.iter().cloned().collect(),
    })
}

pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(search))
        .route("/attributes", get(list_attributes))
}
