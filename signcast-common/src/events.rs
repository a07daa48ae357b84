//! Event types for the Signcast event system
//!
//! Provides shared event definitions and the EventBus used to fan changes
//! out to connected dashboard clients over SSE.

use crate::types::partnership::PartnershipStage;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Signcast event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
/// All events use this central enum for type safety and exhaustive matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SigncastEvent {
    /// A terminal was registered
    TerminalCreated {
        terminal_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A terminal's record changed (fields, status, screens)
    TerminalUpdated {
        terminal_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A terminal was removed from the fleet
    TerminalDeleted {
        terminal_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A terminal's favorite flag flipped
    FavoriteToggled {
        terminal_id: Uuid,
        /// Value after the toggle
        is_favorite: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A screen completed pairing and went active
    ScreenSynced {
        terminal_id: Uuid,
        screen_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A screen's playlist changed
    ///
    /// Carries enough for connected UIs to refresh the summary line
    /// without refetching the whole playlist.
    PlaylistChanged {
        screen_id: Uuid,
        /// What caused the change
        trigger: PlaylistChangeTrigger,
        /// Item count after the change
        item_count: usize,
        /// Aggregate effective duration after the change
        total_duration_secs: u32,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A media asset was created, updated, or deleted
    MediaLibraryChanged {
        media_id: Uuid,
        change: LibraryChange,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A partnership moved to another pipeline stage
    PartnershipStageChanged {
        partnership_id: Uuid,
        from: PartnershipStage,
        to: PartnershipStage,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl SigncastEvent {
    /// Event type name, matching the `"type"` tag on the wire
    ///
    /// Used as the SSE event name so clients can addEventListener per type.
    pub fn event_type(&self) -> &'static str {
        match self {
            SigncastEvent::TerminalCreated { .. } => "TerminalCreated",
            SigncastEvent::TerminalUpdated { .. } => "TerminalUpdated",
            SigncastEvent::TerminalDeleted { .. } => "TerminalDeleted",
            SigncastEvent::FavoriteToggled { .. } => "FavoriteToggled",
            SigncastEvent::ScreenSynced { .. } => "ScreenSynced",
            SigncastEvent::PlaylistChanged { .. } => "PlaylistChanged",
            SigncastEvent::MediaLibraryChanged { .. } => "MediaLibraryChanged",
            SigncastEvent::PartnershipStageChanged { .. } => "PartnershipStageChanged",
        }
    }
}

/// What caused a playlist change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistChangeTrigger {
    ItemsAdded,
    ItemRemoved,
    ItemMoved,
    DurationChanged,
    Replicated,
}

/// Kind of media library change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryChange {
    Created,
    Updated,
    Deleted,
}

/// Broadcast bus for SigncastEvent
///
/// Subscribers that lag past the channel capacity skip missed events; the
/// dashboard refetches on the next event, so losses are tolerable.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SigncastEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<SigncastEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring the no-subscriber case
    ///
    /// Store mutations emit unconditionally; with no dashboard connected
    /// there is simply nobody to notify.
    pub fn emit_lossy(&self, event: SigncastEvent) {
        let _ = self.tx.send(event);
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> SigncastEvent {
        SigncastEvent::FavoriteToggled {
            terminal_id: Uuid::new_v4(),
            is_favorite: true,
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_event_bus_capacity() {
        let bus = EventBus::new(100);
        assert_eq!(bus.capacity(), 100);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_bus_delivers_to_subscriber() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit_lossy(sample_event());
        let received = rx.recv().await.expect("event should arrive");
        match received {
            SigncastEvent::FavoriteToggled { is_favorite, .. } => assert!(is_favorite),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new(2);
        bus.emit_lossy(sample_event());
        bus.emit_lossy(sample_event());
        bus.emit_lossy(sample_event());
    }

    #[test]
    fn test_event_serialization_tags_type() {
        let event = SigncastEvent::PlaylistChanged {
            screen_id: Uuid::new_v4(),
            trigger: PlaylistChangeTrigger::ItemsAdded,
            item_count: 3,
            total_duration_secs: 95,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["type"], "PlaylistChanged");
        assert_eq!(json["trigger"], "ItemsAdded");
        assert_eq!(json["item_count"], 3);
        assert_eq!(json["type"], event.event_type());
    }
}
