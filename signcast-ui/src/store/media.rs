//! Media library operations
//!
//! Deleting an asset also purges it from group membership and from every
//! playlist referencing it; playlists reindex so positions stay contiguous.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use signcast_common::types::{
    Media, MediaOrientation, MediaStatus, MediaType, TerminalCategory,
};
use signcast_common::Result;
use tracing::debug;
use uuid::Uuid;

use super::core::Store;

/// Filter pipeline for the media library. All present conditions must match.
#[derive(Debug, Clone, Default)]
pub struct MediaFilter {
    /// Case-insensitive substring against the asset name
    pub search: Option<String>,
    pub media_type: Option<MediaType>,
    pub category: Option<TerminalCategory>,
    pub status: Option<MediaStatus>,
}

impl MediaFilter {
    fn matches(&self, media: &Media) -> bool {
        if let Some(search) = &self.search {
            if !media.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if let Some(media_type) = self.media_type {
            if media.media_type != media_type {
                return false;
            }
        }
        if let Some(category) = self.category {
            if media.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if media.status != status {
                return false;
            }
        }
        true
    }
}

/// Payload for registering a media asset
#[derive(Debug, Clone, Deserialize)]
pub struct NewMedia {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub category: TerminalCategory,
    pub orientation: MediaOrientation,
    #[serde(default = "default_status")]
    pub status: MediaStatus,
    pub file_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub duration_secs: Option<u32>,
    #[serde(default)]
    pub terminals: Vec<Uuid>,
    #[serde(default)]
    pub collect_stats: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub schedule_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub schedule_end: Option<DateTime<Utc>>,
}

fn default_status() -> MediaStatus {
    MediaStatus::Active
}

/// Partial media update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub category: Option<TerminalCategory>,
    pub orientation: Option<MediaOrientation>,
    pub status: Option<MediaStatus>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration_secs: Option<Option<u32>>,
    pub terminals: Option<Vec<Uuid>>,
    pub collect_stats: Option<bool>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub youtube_id: Option<String>,
    pub schedule_start: Option<Option<DateTime<Utc>>>,
    pub schedule_end: Option<Option<DateTime<Utc>>>,
}

impl Store {
    pub async fn list_media(&self, filter: &MediaFilter) -> Vec<Media> {
        let inner = self.inner.read().await;
        inner
            .media
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }

    pub async fn get_media(&self, id: Uuid) -> Result<Media> {
        let inner = self.inner.read().await;
        inner.media_item(id).cloned()
    }

    pub async fn create_media(&self, new: NewMedia) -> Media {
        let now = Utc::now();
        let media = Media {
            id: Uuid::new_v4(),
            name: new.name,
            media_type: new.media_type,
            category: new.category,
            orientation: new.orientation,
            file_url: new.file_url,
            thumbnail_url: new.thumbnail_url,
            created_at: now,
            updated_at: now,
            status: new.status,
            duration_secs: new.duration_secs,
            terminals: new.terminals,
            collect_stats: new.collect_stats,
            views: None,
            author: new.author,
            description: new.description,
            youtube_id: new.youtube_id,
            schedule_start: new.schedule_start,
            schedule_end: new.schedule_end,
        };

        let mut inner = self.inner.write().await;
        inner.media.push(media.clone());
        media
    }

    pub async fn update_media(&self, id: Uuid, update: MediaUpdate) -> Result<Media> {
        let mut inner = self.inner.write().await;
        let media = inner.media_item_mut(id)?;

        if let Some(name) = update.name {
            media.name = name;
        }
        if let Some(media_type) = update.media_type {
            media.media_type = media_type;
        }
        if let Some(category) = update.category {
            media.category = category;
        }
        if let Some(orientation) = update.orientation {
            media.orientation = orientation;
        }
        if let Some(status) = update.status {
            media.status = status;
        }
        if let Some(file_url) = update.file_url {
            media.file_url = file_url;
        }
        if let Some(thumbnail_url) = update.thumbnail_url {
            media.thumbnail_url = thumbnail_url;
        }
        if let Some(duration_secs) = update.duration_secs {
            media.duration_secs = duration_secs;
        }
        if let Some(terminals) = update.terminals {
            media.terminals = terminals;
        }
        if let Some(collect_stats) = update.collect_stats {
            media.collect_stats = collect_stats;
        }
        if let Some(author) = update.author {
            media.author = Some(author);
        }
        if let Some(description) = update.description {
            media.description = Some(description);
        }
        if let Some(youtube_id) = update.youtube_id {
            media.youtube_id = Some(youtube_id);
        }
        if let Some(schedule_start) = update.schedule_start {
            media.schedule_start = schedule_start;
        }
        if let Some(schedule_end) = update.schedule_end {
            media.schedule_end = schedule_end;
        }
        media.updated_at = Utc::now();

        Ok(media.clone())
    }

    /// Delete an asset and every reference to it: group membership and
    /// playlist items (which reindex on removal).
    pub async fn delete_media(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.media_item(id)?;

        inner.media.retain(|m| m.id != id);
        for group in &mut inner.groups {
            group.media_ids.retain(|mid| *mid != id);
        }
        let mut purged = 0;
        for playlist in inner.playlists.values_mut() {
            purged += playlist.remove_media(id);
        }
        if purged > 0 {
            debug!(media_id = %id, items = purged, "Purged deleted media from playlists");
        }
        Ok(())
    }
}
