//! Store state container and shared lookups

use std::collections::HashMap;

use signcast_common::types::{Group, Media, Partnership, Playlist, Terminal};
use signcast_common::{Error, Result};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dashboard::{DayHealth, WeekComparison};
use super::fixtures;
use super::sync::PairingSession;

/// In-memory fleet state shared across HTTP handlers
pub struct Store {
    pub(super) inner: RwLock<StoreInner>,
}

#[derive(Default)]
pub(super) struct StoreInner {
    pub(super) terminals: Vec<Terminal>,
    pub(super) media: Vec<Media>,
    pub(super) groups: Vec<Group>,
    pub(super) partnerships: Vec<Partnership>,
    /// Playlists keyed by screen id
    pub(super) playlists: HashMap<Uuid, Playlist>,
    /// Live pairing sessions keyed by screen id
    pub(super) pairing: HashMap<Uuid, PairingSession>,
    /// Seeded weekly health series for the dashboard chart
    pub(super) weekly_health: Vec<DayHealth>,
    /// Seeded month-over-month exhibition series
    pub(super) monthly_exhibitions: Vec<WeekComparison>,
}

impl Store {
    /// Empty store, no seed data
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Store seeded with the demo fleet
    pub fn with_fixtures() -> Self {
        Self {
            inner: RwLock::new(fixtures::seed()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreInner {
    pub(super) fn terminal(&self, id: Uuid) -> Result<&Terminal> {
        self.terminals
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("terminal {}", id)))
    }

    pub(super) fn terminal_mut(&mut self, id: Uuid) -> Result<&mut Terminal> {
        self.terminals
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("terminal {}", id)))
    }

    pub(super) fn media_item(&self, id: Uuid) -> Result<&Media> {
        self.media
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::NotFound(format!("media {}", id)))
    }

    pub(super) fn media_item_mut(&mut self, id: Uuid) -> Result<&mut Media> {
        self.media
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::NotFound(format!("media {}", id)))
    }

    pub(super) fn partnership_mut(&mut self, id: Uuid) -> Result<&mut Partnership> {
        self.partnerships
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("partnership {}", id)))
    }

    /// Terminal that owns the given screen
    pub(super) fn screen_terminal_id(&self, screen_id: Uuid) -> Result<Uuid> {
        self.terminals
            .iter()
            .find(|t| t.screen_configs.iter().any(|s| s.id == screen_id))
            .map(|t| t.id)
            .ok_or_else(|| Error::NotFound(format!("screen {}", screen_id)))
    }

    /// Intrinsic duration of a media asset, if it is known to the library
    pub(super) fn intrinsic_duration(&self, media_id: &Uuid) -> Option<u32> {
        self.media
            .iter()
            .find(|m| m.id == *media_id)
            .and_then(|m| m.duration_secs)
    }
}
