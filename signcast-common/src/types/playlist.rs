//! Playlist: ordered list of Media references scheduled for one Screen
//!
//! Positions are always exactly `0..n-1` in storage order. Every mutation
//! reindexes, so removals never leave gaps and reorder round-trips are
//! exact.

use crate::duration::{DEFAULT_IMAGE_DURATION_SECS, MIN_IMAGE_DURATION_SECS};
use crate::types::media::MediaType;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scheduled media reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: Uuid,
    pub media_id: Uuid,
    pub position: usize,
    /// Per-item display duration, seconds. Falls back to the media's
    /// intrinsic duration when unset.
    pub duration_override_secs: Option<u32>,
}

impl PlaylistItem {
    /// Effective display duration: override, else intrinsic, else 0
    pub fn effective_duration_secs(&self, intrinsic_secs: Option<u32>) -> u32 {
        self.duration_override_secs.or(intrinsic_secs).unwrap_or(0)
    }
}

/// Direction for an adjacent move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ordered playback list for one screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a media reference at the tail, returning the new item's id.
    ///
    /// `duration_secs` seeds the item's override; callers derive it with
    /// [`default_item_duration`] so images pick up the fixed default.
    pub fn append(&mut self, media_id: Uuid, duration_secs: Option<u32>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(PlaylistItem {
            id,
            media_id,
            position: self.items.len(),
            duration_override_secs: duration_secs,
        });
        id
    }

    /// Remove an item by id, closing the gap it leaves.
    pub fn remove(&mut self, item_id: Uuid) -> Result<PlaylistItem> {
        let index = self.position_of(item_id)?;
        let removed = self.items.remove(index);
        self.reindex();
        Ok(removed)
    }

    /// Remove every item that references `media_id`. Returns removed count.
    pub fn remove_media(&mut self, media_id: Uuid) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.media_id != media_id);
        let removed = before - self.items.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    /// Swap an item with its neighbor. Returns `false` for the boundary
    /// no-op (first item up, last item down).
    pub fn move_item(&mut self, item_id: Uuid, direction: MoveDirection) -> Result<bool> {
        let index = self.position_of(item_id)?;
        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return Ok(false);
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 == self.items.len() {
                    return Ok(false);
                }
                index + 1
            }
        };
        self.items.swap(index, target);
        self.reindex();
        Ok(true)
    }

    /// Move an item to an arbitrary position (clamped to the list end).
    /// Returns the position it landed on.
    pub fn reorder(&mut self, item_id: Uuid, to_position: usize) -> Result<usize> {
        let index = self.position_of(item_id)?;
        let item = self.items.remove(index);
        let target = to_position.min(self.items.len());
        self.items.insert(target, item);
        self.reindex();
        Ok(target)
    }

    /// Set or clear an item's duration override.
    pub fn set_duration(&mut self, item_id: Uuid, duration_secs: Option<u32>) -> Result<()> {
        let index = self.position_of(item_id)?;
        self.items[index].duration_override_secs = duration_secs;
        Ok(())
    }

    /// Aggregate effective duration, given a lookup for intrinsic durations.
    pub fn total_duration_secs<F>(&self, intrinsic: F) -> u32
    where
        F: Fn(&Uuid) -> Option<u32>,
    {
        self.items
            .iter()
            .map(|item| item.effective_duration_secs(intrinsic(&item.media_id)))
            .sum()
    }

    /// A copy with fresh item ids, for replication onto sibling screens.
    pub fn replicated(&self) -> Playlist {
        Playlist {
            items: self
                .items
                .iter()
                .map(|item| PlaylistItem {
                    id: Uuid::new_v4(),
                    media_id: item.media_id,
                    position: item.position,
                    duration_override_secs: item.duration_override_secs,
                })
                .collect(),
        }
    }

    fn position_of(&self, item_id: Uuid) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| Error::NotFound(format!("Playlist item {}", item_id)))
    }

    fn reindex(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index;
        }
    }
}

/// Initial item duration for a media asset.
///
/// Images default to [`DEFAULT_IMAGE_DURATION_SECS`] when the intrinsic
/// duration is missing or under [`MIN_IMAGE_DURATION_SECS`]; everything
/// else keeps its intrinsic duration.
pub fn default_item_duration(media_type: MediaType, intrinsic_secs: Option<u32>) -> Option<u32> {
    if media_type == MediaType::Image {
        match intrinsic_secs {
            Some(d) if d >= MIN_IMAGE_DURATION_SECS => Some(d),
            _ => Some(DEFAULT_IMAGE_DURATION_SECS),
        }
    } else {
        intrinsic_secs
    }
}
