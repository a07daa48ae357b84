//! Server-Sent Events broadcaster
//!
//! Streams store change events to connected dashboard clients. Each event
//! goes out with its variant name as the SSE event name and the JSON body
//! as data, so the frontend can addEventListener per type.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use crate::AppState;

/// GET /api/events - SSE event stream
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("New SSE client connected");

    let rx = state.events.subscribe();

    let stream = async_stream::stream! {
        // Opening event so clients know the subscription is live
        yield Ok(Event::default().event("Connected").data("{}"));

        let mut events = BroadcastStream::new(rx);
        while let Some(result) = events.next().await {
            match result {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        debug!("Broadcasting SSE event: {}", event.event_type());
                        yield Ok(Event::default().event(event.event_type()).data(json));
                    }
                    Err(e) => warn!("Failed to serialize event: {}", e),
                },
                // Lagged subscribers skip missed events and keep the stream
                Err(e) => warn!("SSE subscriber lagged: {:?}", e),
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Build SSE routes
pub fn sse_routes() -> Router<AppState> {
    Router::new().route("/api/events", get(event_stream))
}
