//! Location search endpoint
//!
//! Resolves the search box input to coordinates. CEP queries consult the
//! registered fleet before the provider, so a known site answers instantly
//! and exactly.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use signcast_common::geo::is_cep_query;

use crate::error::{ApiError, ApiResult};
use crate::geocode::GeocodeResolution;
use crate::AppState;

/// GET /api/geocode query parameters
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

/// GET /api/geocode?q=...
pub async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> ApiResult<Json<GeocodeResolution>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::BadRequest("q must not be empty".into()));
    }
    if !state.geocoder.has_token() {
        return Err(ApiError::Unavailable(
            "geocoding is not configured; set [geocoding] access_token".into(),
        ));
    }

    let local_match = if is_cep_query(q) {
        state.store.find_by_cep(q).await
    } else {
        None
    };

    let resolution = state.geocoder.resolve(q, local_match).await?;
    Ok(Json(resolution))
}

/// Build geocoding routes
pub fn geocode_routes() -> Router<AppState> {
    Router::new().route("/api/geocode", get(geocode))
}
