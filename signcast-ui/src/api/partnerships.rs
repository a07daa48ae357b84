//! Partnership pipeline endpoints
//!
//! CRUD over the records, the kanban board partition, stage transitions,
//! and follow-up tasks.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use signcast_common::events::SigncastEvent;
use signcast_common::types::{Partnership, PartnershipStage, PartnershipTask};

use crate::error::{ApiError, ApiResult};
use crate::store::{NewPartnership, NewTask, PartnershipUpdate, StageColumn};
use crate::AppState;

/// PUT /api/partnerships/:id/stage request
#[derive(Debug, Deserialize)]
pub struct SetStageRequest {
    pub stage: PartnershipStage,
}

/// PUT /api/partnerships/:id/tasks/:task_id request
#[derive(Debug, Deserialize)]
pub struct SetTaskCompletedRequest {
    pub completed: bool,
}

/// GET /api/partnerships
pub async fn list_partnerships(State(state): State<AppState>) -> Json<Vec<Partnership>> {
    Json(state.store.list_partnerships().await)
}

/// GET /api/partnerships/board
pub async fn partnership_board(State(state): State<AppState>) -> Json<Vec<StageColumn>> {
    Json(state.store.partnership_board().await)
}

/// GET /api/partnerships/:id
pub async fn get_partnership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Partnership>> {
    Ok(Json(state.store.get_partnership(id).await?))
}

/// POST /api/partnerships
pub async fn create_partnership(
    State(state): State<AppState>,
    Json(request): Json<NewPartnership>,
) -> ApiResult<(StatusCode, Json<Partnership>)> {
    if request.company_name.trim().is_empty() {
        return Err(ApiError::BadRequest("company_name must not be empty".into()));
    }
    if request.contact_name.trim().is_empty() {
        return Err(ApiError::BadRequest("contact_name must not be empty".into()));
    }

    let partnership = state.store.create_partnership(request).await;
    tracing::info!(
        partnership_id = %partnership.id,
        company = %partnership.company_name,
        "Partnership opened"
    );

    Ok((StatusCode::CREATED, Json(partnership)))
}

/// PUT /api/partnerships/:id
pub async fn update_partnership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PartnershipUpdate>,
) -> ApiResult<Json<Partnership>> {
    Ok(Json(state.store.update_partnership(id, request).await?))
}

/// DELETE /api/partnerships/:id
pub async fn delete_partnership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.delete_partnership(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/partnerships/:id/stage
///
/// Setting the current stage again is accepted but emits nothing.
pub async fn set_stage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStageRequest>,
) -> ApiResult<Json<Partnership>> {
    let (from, partnership) = state.store.set_partnership_stage(id, request.stage).await?;

    if from != partnership.stage {
        state.events.emit_lossy(SigncastEvent::PartnershipStageChanged {
            partnership_id: id,
            from,
            to: partnership.stage,
            timestamp: Utc::now(),
        });
    }

    Ok(Json(partnership))
}

/// POST /api/partnerships/:id/tasks
pub async fn add_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<PartnershipTask>)> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".into()));
    }

    let task = state.store.add_partnership_task(id, request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/partnerships/:id/tasks/:task_id
pub async fn set_task_completed(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<SetTaskCompletedRequest>,
) -> ApiResult<Json<PartnershipTask>> {
    let task = state
        .store
        .set_task_completed(id, task_id, request.completed)
        .await?;
    Ok(Json(task))
}

/// Build partnership routes
pub fn partnership_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/partnerships",
            get(list_partnerships).post(create_partnership),
        )
        .route("/api/partnerships/board", get(partnership_board))
        .route(
            "/api/partnerships/:id",
            get(get_partnership)
                .put(update_partnership)
                .delete(delete_partnership),
        )
        .route("/api/partnerships/:id/stage", put(set_stage))
        .route("/api/partnerships/:id/tasks", post(add_task))
        .route(
            "/api/partnerships/:id/tasks/:task_id",
            put(set_task_completed),
        )
}
