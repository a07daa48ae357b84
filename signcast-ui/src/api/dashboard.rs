//! Dashboard summary endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::store::DashboardSummary;
use crate::AppState;

/// GET /api/dashboard
pub async fn dashboard_summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.store.dashboard_summary().await)
}

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard_summary))
}
