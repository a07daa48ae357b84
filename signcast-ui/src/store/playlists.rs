//! Per-screen playlist operations
//!
//! **Responsibilities:**
//! - Resolve a screen's playlist into a view joined with media records
//! - Append, remove, move, reorder, and re-time items
//! - Replicate one screen's playlist onto its sibling screens
//!
//! Position bookkeeping itself lives in `signcast_common::types::Playlist`;
//! this module wires it to the media library and the screen topology.

use serde::Serialize;
use signcast_common::duration::{format_clock_opt, format_total};
use signcast_common::types::{default_item_duration, Media, MoveDirection, Playlist};
use signcast_common::{Error, Result};
use uuid::Uuid;

use super::core::{Store, StoreInner};

/// A playlist resolved for display: items joined with their media records
/// plus the aggregate duration.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistView {
    pub screen_id: Uuid,
    pub items: Vec<PlaylistItemView>,
    pub total_duration_secs: u32,
    /// `Xm Ys` rendering of the total
    pub total_duration_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistItemView {
    pub id: Uuid,
    pub media_id: Uuid,
    pub position: usize,
    pub duration_override_secs: Option<u32>,
    pub effective_duration_secs: u32,
    /// `M:SS` clock; a dash when the duration is unknown
    pub duration_label: String,
    /// Joined media record; None only if the library entry vanished
    pub media: Option<Media>,
}

fn build_view(inner: &StoreInner, screen_id: Uuid) -> Result<PlaylistView> {
    let playlist = inner
        .playlists
        .get(&screen_id)
        .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;

    let items = playlist
        .items()
        .iter()
        .map(|item| {
            let media = inner.media.iter().find(|m| m.id == item.media_id).cloned();
            let intrinsic = media.as_ref().and_then(|m| m.duration_secs);
            let effective = item.effective_duration_secs(intrinsic);
            PlaylistItemView {
                id: item.id,
                media_id: item.media_id,
                position: item.position,
                duration_override_secs: item.duration_override_secs,
                effective_duration_secs: effective,
                duration_label: format_clock_opt(Some(effective)),
                media,
            }
        })
        .collect();

    let total = playlist.total_duration_secs(|media_id| inner.intrinsic_duration(media_id));

    Ok(PlaylistView {
        screen_id,
        items,
        total_duration_secs: total,
        total_duration_label: format_total(total),
    })
}

impl Store {
    pub async fn get_playlist(&self, screen_id: Uuid) -> Result<PlaylistView> {
        let inner = self.inner.read().await;
        build_view(&inner, screen_id)
    }

    /// Append media to the playlist tail in request order. Each item's
    /// duration override is seeded from the asset: intrinsic duration as-is,
    /// except images, which get the 10s default when theirs is missing or
    /// under 5s.
    pub async fn add_playlist_items(
        &self,
        screen_id: Uuid,
        media_ids: &[Uuid],
    ) -> Result<PlaylistView> {
        let mut inner = self.inner.write().await;

        let mut seeds = Vec::with_capacity(media_ids.len());
        for media_id in media_ids {
            let media = inner.media_item(*media_id)?;
            seeds.push((
                *media_id,
                default_item_duration(media.media_type, media.duration_secs),
            ));
        }

        let playlist = inner
            .playlists
            .get_mut(&screen_id)
            .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;
        for (media_id, seed) in seeds {
            playlist.append(media_id, seed);
        }

        build_view(&inner, screen_id)
    }

    /// Remove an item; remaining items reindex to `0..n-1`
    pub async fn remove_playlist_item(
        &self,
        screen_id: Uuid,
        item_id: Uuid,
    ) -> Result<PlaylistView> {
        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&screen_id)
            .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;
        playlist.remove(item_id)?;
        build_view(&inner, screen_id)
    }

    /// Swap an item with its neighbor. Returns the refreshed view and
    /// whether anything moved (false at the boundaries).
    pub async fn move_playlist_item(
        &self,
        screen_id: Uuid,
        item_id: Uuid,
        direction: MoveDirection,
    ) -> Result<(PlaylistView, bool)> {
        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&screen_id)
            .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;
        let moved = playlist.move_item(item_id, direction)?;
        Ok((build_view(&inner, screen_id)?, moved))
    }

    /// Move an item to an explicit position (clamped past the end)
    pub async fn reorder_playlist_item(
        &self,
        screen_id: Uuid,
        item_id: Uuid,
        to_position: usize,
    ) -> Result<PlaylistView> {
        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&screen_id)
            .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;
        playlist.reorder(item_id, to_position)?;
        build_view(&inner, screen_id)
    }

    /// Set or clear an item's duration override
    pub async fn set_playlist_item_duration(
        &self,
        screen_id: Uuid,
        item_id: Uuid,
        duration_secs: Option<u32>,
    ) -> Result<PlaylistView> {
        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&screen_id)
            .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;
        playlist.set_duration(item_id, duration_secs)?;
        build_view(&inner, screen_id)
    }

    /// Copy this playlist onto every sibling screen of the same terminal,
    /// replacing whatever they had. Item ids are regenerated per sibling.
    /// Returns the number of screens written.
    pub async fn replicate_playlist(&self, screen_id: Uuid) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let terminal_id = inner.screen_terminal_id(screen_id)?;
        let source: Playlist = inner
            .playlists
            .get(&screen_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("playlist for screen {}", screen_id)))?;

        let sibling_ids: Vec<Uuid> = inner
            .terminal(terminal_id)?
            .screen_configs
            .iter()
            .filter(|s| s.id != screen_id)
            .map(|s| s.id)
            .collect();

        for sibling_id in &sibling_ids {
            inner.playlists.insert(*sibling_id, source.replicated());
        }
        Ok(sibling_ids.len())
    }
}
