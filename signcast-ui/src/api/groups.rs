//! Media group endpoints
//!
//! `PUT /api/groups/:id` has upsert semantics: an unknown id creates the
//! group under that id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use signcast_common::types::Group;

use crate::error::{ApiError, ApiResult};
use crate::store::{GroupDetail, GroupUpsert};
use crate::AppState;

/// GET /api/groups
pub async fn list_groups(State(state): State<AppState>) -> Json<Vec<GroupDetail>> {
    Json(state.store.list_groups().await)
}

/// GET /api/groups/:id
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GroupDetail>> {
    Ok(Json(state.store.get_group(id).await?))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(request): Json<GroupUpsert>,
) -> ApiResult<(StatusCode, Json<Group>)> {
    validate_upsert(&request)?;
    let group = state.store.create_group(request).await;
    Ok((StatusCode::CREATED, Json(group)))
}

/// PUT /api/groups/:id
pub async fn upsert_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GroupUpsert>,
) -> ApiResult<Json<Group>> {
    validate_upsert(&request)?;
    Ok(Json(state.store.upsert_group(id, request).await))
}

/// DELETE /api/groups/:id
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.delete_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_upsert(request: &GroupUpsert) -> Result<(), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }
    Ok(())
}

/// Build group routes
pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/api/groups", get(list_groups).post(create_group))
        .route(
            "/api/groups/:id",
            get(get_group).put(upsert_group).delete(delete_group),
        )
}
