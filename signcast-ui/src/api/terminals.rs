//! Terminal fleet endpoints
//!
//! Listing with the full filter pipeline, registration with field-level
//! validation, partial updates, deletion, and the favorite toggle.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signcast_common::events::SigncastEvent;
use signcast_common::types::{Coordinates, Terminal, TerminalCategory, TerminalStatus};

use crate::error::{ApiError, ApiResult};
use crate::pagination::{calculate_pagination, page_slice};
use crate::store::{NewTerminal, TerminalFilter, TerminalUpdate, DEFAULT_RADIUS_KM};
use crate::AppState;

/// GET /api/terminals query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListTerminalsQuery {
    pub search: Option<String>,
    pub status: Option<TerminalStatus>,
    pub category: Option<TerminalCategory>,
    /// Only terminals with at least one active screen
    #[serde(default)]
    pub available: bool,
    /// Only favorited terminals
    #[serde(default)]
    pub favorites: bool,
    /// Center of a radius search, `lon,lat`
    pub near: Option<String>,
    pub radius_km: Option<f64>,
    pub page: Option<usize>,
}

/// GET /api/terminals response
#[derive(Debug, Serialize)]
pub struct TerminalListResponse {
    pub terminals: Vec<Terminal>,
    pub page: usize,
    pub total_pages: usize,
    /// Total matches before pagination
    pub total: usize,
}

/// POST /api/terminals/:id/favorite response
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub terminal_id: Uuid,
    pub is_favorite: bool,
}

/// GET /api/terminals
pub async fn list_terminals(
    State(state): State<AppState>,
    Query(query): Query<ListTerminalsQuery>,
) -> ApiResult<Json<TerminalListResponse>> {
    let near = match &query.near {
        Some(raw) => Some(parse_near(raw)?),
        None => None,
    };
    let filter = TerminalFilter {
        search: query.search,
        status: query.status,
        category: query.category,
        only_available: query.available,
        only_favorites: query.favorites,
        near,
        radius_km: query.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
    };

    let matches = state.store.list_terminals(&filter).await;
    let pagination = calculate_pagination(matches.len(), query.page.unwrap_or(1));
    let terminals = page_slice(&matches, &pagination).to_vec();

    Ok(Json(TerminalListResponse {
        terminals,
        page: pagination.page,
        total_pages: pagination.total_pages,
        total: matches.len(),
    }))
}

/// GET /api/terminals/:id
pub async fn get_terminal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Terminal>> {
    Ok(Json(state.store.get_terminal(id).await?))
}

/// POST /api/terminals
pub async fn create_terminal(
    State(state): State<AppState>,
    Json(request): Json<NewTerminal>,
) -> ApiResult<(StatusCode, Json<Terminal>)> {
    validate_new_terminal(&request)?;

    let terminal = state.store.create_terminal(request).await;
    tracing::info!(terminal_id = %terminal.id, name = %terminal.name, "Terminal registered");

    state.events.emit_lossy(SigncastEvent::TerminalCreated {
        terminal_id: terminal.id,
        timestamp: Utc::now(),
    });

    Ok((StatusCode::CREATED, Json(terminal)))
}

/// PUT /api/terminals/:id
pub async fn update_terminal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TerminalUpdate>,
) -> ApiResult<Json<Terminal>> {
    let terminal = state.store.update_terminal(id, request).await?;

    state.events.emit_lossy(SigncastEvent::TerminalUpdated {
        terminal_id: id,
        timestamp: Utc::now(),
    });

    Ok(Json(terminal))
}

/// DELETE /api/terminals/:id
pub async fn delete_terminal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.delete_terminal(id).await?;
    tracing::info!(terminal_id = %id, "Terminal removed");

    state.events.emit_lossy(SigncastEvent::TerminalDeleted {
        terminal_id: id,
        timestamp: Utc::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/terminals/:id/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FavoriteResponse>> {
    let is_favorite = state.store.toggle_favorite(id).await?;

    state.events.emit_lossy(SigncastEvent::FavoriteToggled {
        terminal_id: id,
        is_favorite,
        timestamp: Utc::now(),
    });

    Ok(Json(FavoriteResponse {
        terminal_id: id,
        is_favorite,
    }))
}

/// Parse a `lon,lat` center parameter
fn parse_near(raw: &str) -> Result<Coordinates, ApiError> {
    let invalid = || ApiError::BadRequest(format!("near must be 'lon,lat', got '{}'", raw));

    let mut parts = raw.split(',');
    let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
    let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// Field-level validation for terminal registration
fn validate_new_terminal(new: &NewTerminal) -> Result<(), ApiError> {
    let fail = |msg: &str| Err(ApiError::BadRequest(msg.to_string()));

    if new.name.trim().chars().count() < 3 {
        return fail("name must be at least 3 characters");
    }
    if new.street.trim().chars().count() < 3 {
        return fail("street must be at least 3 characters");
    }
    if new.number.trim().is_empty() {
        return fail("number must not be empty");
    }
    if !is_valid_cep(new.cep.trim()) {
        return fail("cep must be XXXXX-XXX or 8 digits");
    }
    if new.state.trim().chars().count() != 2 {
        return fail("state must be the 2-letter abbreviation");
    }
    if new.city.trim().chars().count() < 2 {
        return fail("city must be at least 2 characters");
    }
    for phone in [&new.phones.primary, &new.phones.secondary]
        .into_iter()
        .flatten()
    {
        if !is_valid_phone(phone) {
            return fail("phone must match (DD) D DDDD-DDDD");
        }
    }
    if new.operating_hours.work_days.is_empty() {
        return fail("at least one work day is required");
    }
    if new.demographics.average_foot_traffic < 1 {
        return fail("average foot traffic must be at least 1");
    }
    if new.demographics.social_class.is_empty() {
        return fail("at least one social class is required");
    }
    if new.media.images.is_empty() {
        return fail("at least one site image is required");
    }
    Ok(())
}

/// Exactly `XXXXX-XXX` or 8 bare digits
fn is_valid_cep(cep: &str) -> bool {
    let bytes = cep.as_bytes();
    match bytes.len() {
        8 => bytes.iter().all(u8::is_ascii_digit),
        9 => {
            bytes[5] == b'-'
                && bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Brazilian mobile format `(DD) D DDDD-DDDD`
fn is_valid_phone(phone: &str) -> bool {
    let b = phone.as_bytes();
    b.len() == 16
        && b[0] == b'('
        && b[1].is_ascii_digit()
        && b[2].is_ascii_digit()
        && b[3] == b')'
        && b[4] == b' '
        && b[5].is_ascii_digit()
        && b[6] == b' '
        && b[7..11].iter().all(u8::is_ascii_digit)
        && b[11] == b'-'
        && b[12..].iter().all(u8::is_ascii_digit)
}

/// Build terminal routes
pub fn terminal_routes() -> Router<AppState> {
    Router::new()
        .route("/api/terminals", get(list_terminals).post(create_terminal))
        .route(
            "/api/terminals/:id",
            get(get_terminal).put(update_terminal).delete(delete_terminal),
        )
        .route("/api/terminals/:id/favorite", post(toggle_favorite))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cep_validation() {
        assert!(is_valid_cep("80020-310"));
        assert!(is_valid_cep("80020310"));
        assert!(!is_valid_cep("80020 310"));
        assert!(!is_valid_cep("8002-0310"));
        assert!(!is_valid_cep("80020-31a"));
        assert!(!is_valid_cep("800203100"));
        assert!(!is_valid_cep(""));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("(41) 9 9876-5432"));
        assert!(is_valid_phone("(11) 9 1234-5678"));
        assert!(!is_valid_phone("41 9 9876-5432"));
        assert!(!is_valid_phone("(41) 99876-5432"));
        assert!(!is_valid_phone("(41) 9 9876 5432"));
        assert!(!is_valid_phone("(41) 9 9876-543"));
    }

    #[test]
    fn test_parse_near() {
        let center = parse_near("-49.27,-25.43").unwrap();
        assert_eq!(center.longitude, -49.27);
        assert_eq!(center.latitude, -25.43);

        let center = parse_near(" -46.63 , -23.55 ").unwrap();
        assert_eq!(center.longitude, -46.63);

        assert!(parse_near("-49.27").is_err());
        assert!(parse_near("-49.27,-25.43,10").is_err());
        assert!(parse_near("lon,lat").is_err());
    }
}
