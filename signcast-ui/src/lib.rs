//! signcast-ui library - fleet dashboard server
//!
//! Exposes the application state, router construction, and all API modules
//! for integration testing.

pub mod api;
pub mod error;
pub mod geocode;
pub mod pagination;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::geocode::GeocodeClient;
use crate::store::Store;
use signcast_common::events::EventBus;

/// Broadcast capacity of the dashboard event bus
///
/// Subscribers that fall further behind than this skip ahead and the UI
/// refetches, so the value only bounds memory, not correctness.
pub const EVENT_BUS_CAPACITY: usize = 256;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory fleet store
    pub store: Arc<Store>,
    /// Event bus for SSE broadcasting
    pub events: EventBus,
    /// Forward-geocoding client
    pub geocoder: Arc<GeocodeClient>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Store, geocoder: GeocodeClient) -> Self {
        Self {
            store: Arc::new(store),
            events: EventBus::new(EVENT_BUS_CAPACITY),
            geocoder: Arc::new(geocoder),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// All API routes live under `/api`; the embedded web UI is served from `/`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML page + static assets)
        .merge(api::ui_routes())
        // API routes
        .merge(api::health_routes())
        .merge(api::dashboard_routes())
        .merge(api::terminal_routes())
        .merge(api::screen_routes())
        .merge(api::playlist_routes())
        .merge(api::media_routes())
        .merge(api::group_routes())
        .merge(api::partnership_routes())
        .merge(api::geocode_routes())
        .merge(api::sse_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
