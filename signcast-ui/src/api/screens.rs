//! Screen configuration and pairing endpoints
//!
//! Screens live under their terminal. Pairing is the two-step flow the
//! installer walks through on site: request a code, then type it into the
//! player to activate the screen.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use signcast_common::events::SigncastEvent;
use signcast_common::types::ScreenConfig;

use crate::error::ApiResult;
use crate::store::{NewScreen, PairingSession, ScreenUpdate};
use crate::AppState;

/// POST .../sync/verify request
#[derive(Debug, Deserialize)]
pub struct VerifyPairingRequest {
    pub code: String,
}

/// POST /api/terminals/:id/screens
pub async fn add_screen(
    State(state): State<AppState>,
    Path(terminal_id): Path<Uuid>,
    Json(request): Json<NewScreen>,
) -> ApiResult<(StatusCode, Json<ScreenConfig>)> {
    let screen = state.store.add_screen(terminal_id, request).await?;

    state.events.emit_lossy(SigncastEvent::TerminalUpdated {
        terminal_id,
        timestamp: Utc::now(),
    });

    Ok((StatusCode::CREATED, Json(screen)))
}

/// PUT /api/terminals/:id/screens/:screen_id
pub async fn update_screen(
    State(state): State<AppState>,
    Path((terminal_id, screen_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ScreenUpdate>,
) -> ApiResult<Json<ScreenConfig>> {
    let screen = state
        .store
        .update_screen(terminal_id, screen_id, request)
        .await?;

    state.events.emit_lossy(SigncastEvent::TerminalUpdated {
        terminal_id,
        timestamp: Utc::now(),
    });

    Ok(Json(screen))
}

/// DELETE /api/terminals/:id/screens/:screen_id
pub async fn remove_screen(
    State(state): State<AppState>,
    Path((terminal_id, screen_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state.store.remove_screen(terminal_id, screen_id).await?;

    state.events.emit_lossy(SigncastEvent::TerminalUpdated {
        terminal_id,
        timestamp: Utc::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/terminals/:id/screens/:screen_id/sync
///
/// Opens a pairing session and answers the code the installer types into
/// the player device.
pub async fn start_sync(
    State(state): State<AppState>,
    Path((terminal_id, screen_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<PairingSession>> {
    let session = state.store.start_pairing(terminal_id, screen_id).await?;
    Ok(Json(session))
}

/// POST /api/terminals/:id/screens/:screen_id/sync/verify
pub async fn verify_sync(
    State(state): State<AppState>,
    Path((terminal_id, screen_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<VerifyPairingRequest>,
) -> ApiResult<Json<ScreenConfig>> {
    let screen = state
        .store
        .verify_pairing(terminal_id, screen_id, request.code.trim())
        .await?;

    state.events.emit_lossy(SigncastEvent::ScreenSynced {
        terminal_id,
        screen_id,
        timestamp: Utc::now(),
    });

    Ok(Json(screen))
}

/// Build screen routes
pub fn screen_routes() -> Router<AppState> {
    Router::new()
        .route("/api/terminals/:id/screens", post(add_screen))
        .route(
            "/api/terminals/:id/screens/:screen_id",
            put(update_screen).delete(remove_screen),
        )
        .route(
            "/api/terminals/:id/screens/:screen_id/sync",
            post(start_sync),
        )
        .route(
            "/api/terminals/:id/screens/:screen_id/sync/verify",
            post(verify_sync),
        )
}
