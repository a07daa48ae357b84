//! Per-screen playlist endpoints
//!
//! Every mutation answers the refreshed playlist view so the editor can
//! redraw without a second fetch, and emits a `PlaylistChanged` event for
//! everything else that is watching.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signcast_common::events::{PlaylistChangeTrigger, SigncastEvent};
use signcast_common::types::MoveDirection;

use crate::error::{ApiError, ApiResult};
use crate::store::PlaylistView;
use crate::AppState;

/// POST .../items request
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub media_ids: Vec<Uuid>,
}

/// POST .../move request
#[derive(Debug, Deserialize)]
pub struct MoveItemRequest {
    pub direction: MoveDirection,
}

/// POST .../reorder request
#[derive(Debug, Deserialize)]
pub struct ReorderItemRequest {
    pub to_position: usize,
}

/// PUT .../duration request
///
/// A missing or null `duration_secs` clears the override back to the
/// media's intrinsic duration.
#[derive(Debug, Deserialize)]
pub struct ItemDurationRequest {
    #[serde(default)]
    pub duration_secs: Option<u32>,
}

/// POST .../replicate response
#[derive(Debug, Serialize)]
pub struct ReplicateResponse {
    pub source_screen_id: Uuid,
    /// Sibling screens whose playlists were replaced
    pub replicated_screens: usize,
}

fn playlist_changed(state: &AppState, view: &PlaylistView, trigger: PlaylistChangeTrigger) {
    state.events.emit_lossy(SigncastEvent::PlaylistChanged {
        screen_id: view.screen_id,
        trigger,
        item_count: view.items.len(),
        total_duration_secs: view.total_duration_secs,
        timestamp: Utc::now(),
    });
}

/// GET /api/screens/:screen_id/playlist
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(screen_id): Path<Uuid>,
) -> ApiResult<Json<PlaylistView>> {
    Ok(Json(state.store.get_playlist(screen_id).await?))
}

/// POST /api/screens/:screen_id/playlist/items
pub async fn add_items(
    State(state): State<AppState>,
    Path(screen_id): Path<Uuid>,
    Json(request): Json<AddItemsRequest>,
) -> ApiResult<Json<PlaylistView>> {
    if request.media_ids.is_empty() {
        return Err(ApiError::BadRequest("media_ids must not be empty".into()));
    }

    let view = state
        .store
        .add_playlist_items(screen_id, &request.media_ids)
        .await?;
    playlist_changed(&state, &view, PlaylistChangeTrigger::ItemsAdded);

    Ok(Json(view))
}

/// DELETE /api/screens/:screen_id/playlist/items/:item_id
pub async fn remove_item(
    State(state): State<AppState>,
    Path((screen_id, item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<PlaylistView>> {
    let view = state.store.remove_playlist_item(screen_id, item_id).await?;
    playlist_changed(&state, &view, PlaylistChangeTrigger::ItemRemoved);

    Ok(Json(view))
}

/// POST /api/screens/:screen_id/playlist/items/:item_id/move
///
/// Boundary moves (first item up, last item down) are accepted but change
/// nothing and emit nothing.
pub async fn move_item(
    State(state): State<AppState>,
    Path((screen_id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<MoveItemRequest>,
) -> ApiResult<Json<PlaylistView>> {
    let (view, moved) = state
        .store
        .move_playlist_item(screen_id, item_id, request.direction)
        .await?;
    if moved {
        playlist_changed(&state, &view, PlaylistChangeTrigger::ItemMoved);
    }

    Ok(Json(view))
}

/// POST /api/screens/:screen_id/playlist/items/:item_id/reorder
pub async fn reorder_item(
    State(state): State<AppState>,
    Path((screen_id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ReorderItemRequest>,
) -> ApiResult<Json<PlaylistView>> {
    let view = state
        .store
        .reorder_playlist_item(screen_id, item_id, request.to_position)
        .await?;
    playlist_changed(&state, &view, PlaylistChangeTrigger::ItemMoved);

    Ok(Json(view))
}

/// PUT /api/screens/:screen_id/playlist/items/:item_id/duration
pub async fn set_item_duration(
    State(state): State<AppState>,
    Path((screen_id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ItemDurationRequest>,
) -> ApiResult<Json<PlaylistView>> {
    if request.duration_secs == Some(0) {
        return Err(ApiError::BadRequest(
            "duration_secs must be at least 1, or null to clear the override".into(),
        ));
    }

    let view = state
        .store
        .set_playlist_item_duration(screen_id, item_id, request.duration_secs)
        .await?;
    playlist_changed(&state, &view, PlaylistChangeTrigger::DurationChanged);

    Ok(Json(view))
}

/// POST /api/screens/:screen_id/playlist/replicate
pub async fn replicate(
    State(state): State<AppState>,
    Path(screen_id): Path<Uuid>,
) -> ApiResult<Json<ReplicateResponse>> {
    let replicated_screens = state.store.replicate_playlist(screen_id).await?;
    tracing::info!(%screen_id, replicated_screens, "Playlist replicated to sibling screens");

    let view = state.store.get_playlist(screen_id).await?;
    playlist_changed(&state, &view, PlaylistChangeTrigger::Replicated);

    Ok(Json(ReplicateResponse {
        source_screen_id: screen_id,
        replicated_screens,
    }))
}

/// Build playlist routes
pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/screens/:screen_id/playlist", get(get_playlist))
        .route("/api/screens/:screen_id/playlist/items", post(add_items))
        .route(
            "/api/screens/:screen_id/playlist/items/:item_id",
            delete(remove_item),
        )
        .route(
            "/api/screens/:screen_id/playlist/items/:item_id/move",
            post(move_item),
        )
        .route(
            "/api/screens/:screen_id/playlist/items/:item_id/reorder",
            post(reorder_item),
        )
        .route(
            "/api/screens/:screen_id/playlist/items/:item_id/duration",
            put(set_item_duration),
        )
        .route("/api/screens/:screen_id/playlist/replicate", post(replicate))
}
