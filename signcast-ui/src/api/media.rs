//! Media library endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use signcast_common::events::{LibraryChange, SigncastEvent};
use signcast_common::types::{Media, MediaStatus, MediaType, TerminalCategory};

use crate::error::{ApiError, ApiResult};
use crate::store::{MediaFilter, MediaUpdate, NewMedia};
use crate::AppState;

/// GET /api/media query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListMediaQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub category: Option<TerminalCategory>,
    pub status: Option<MediaStatus>,
}

fn library_changed(state: &AppState, media_id: Uuid, change: LibraryChange) {
    state.events.emit_lossy(SigncastEvent::MediaLibraryChanged {
        media_id,
        change,
        timestamp: Utc::now(),
    });
}

/// GET /api/media
pub async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<ListMediaQuery>,
) -> Json<Vec<Media>> {
    let filter = MediaFilter {
        search: query.search,
        media_type: query.media_type,
        category: query.category,
        status: query.status,
    };
    Json(state.store.list_media(&filter).await)
}

/// GET /api/media/:id
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Media>> {
    Ok(Json(state.store.get_media(id).await?))
}

/// POST /api/media
pub async fn create_media(
    State(state): State<AppState>,
    Json(request): Json<NewMedia>,
) -> ApiResult<(StatusCode, Json<Media>)> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }
    if request.file_url.trim().is_empty() {
        return Err(ApiError::BadRequest("file_url must not be empty".into()));
    }

    let media = state.store.create_media(request).await;
    library_changed(&state, media.id, LibraryChange::Created);

    Ok((StatusCode::CREATED, Json(media)))
}

/// PUT /api/media/:id
pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MediaUpdate>,
) -> ApiResult<Json<Media>> {
    let media = state.store.update_media(id, request).await?;
    library_changed(&state, id, LibraryChange::Updated);

    Ok(Json(media))
}

/// DELETE /api/media/:id
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.delete_media(id).await?;
    library_changed(&state, id, LibraryChange::Deleted);

    Ok(StatusCode::NO_CONTENT)
}

/// Build media routes
pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/api/media", get(list_media).post(create_media))
        .route(
            "/api/media/:id",
            get(get_media).put(update_media).delete(delete_media),
        )
}
