//! Media: a content asset assignable to terminals

use crate::duration::format_clock_opt;
use crate::types::terminal::TerminalCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Video,
    Audio,
    Youtube,
    Pdf,
    Image,
}

impl MediaType {
    /// Human-readable type label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Youtube => "YouTube",
            Self::Pdf => "PDF",
            Self::Image => "Image",
        }
    }
}

/// Which screen orientations the asset fits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaOrientation {
    Horizontal,
    Vertical,
    Both,
}

/// Publication state of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    Active,
    Inactive,
    Scheduled,
}

/// A content asset (video/audio/image/PDF/YouTube embed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub category: TerminalCategory,
    pub orientation: MediaOrientation,
    pub file_url: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: MediaStatus,
    /// Intrinsic duration in seconds, for video and audio
    pub duration_secs: Option<u32>,
    /// Terminal ids where this asset is displayed
    pub terminals: Vec<Uuid>,
    pub collect_stats: bool,
    pub views: Option<u64>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub youtube_id: Option<String>,
    pub schedule_start: Option<DateTime<Utc>>,
    pub schedule_end: Option<DateTime<Utc>>,
}

impl Media {
    /// Intrinsic duration in clock style (`M:SS`), a dash when unknown
    pub fn display_duration(&self) -> String {
        format_clock_opt(self.duration_secs)
    }
}
