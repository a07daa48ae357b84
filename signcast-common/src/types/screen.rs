//! ScreenConfig: one configured display surface belonging to a Terminal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physical form factor of a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenType {
    TvHorizontal,
    TvVertical,
    Led,
}

impl ScreenType {
    /// Human-readable type label
    pub fn label(&self) -> &'static str {
        match self {
            Self::TvHorizontal => "Horizontal TV",
            Self::TvVertical => "Vertical TV",
            Self::Led => "LED Panel",
        }
    }
}

/// Whether a screen is accepting content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenStatus {
    Active,
    Inactive,
}

/// Configuration of one display surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub screen_type: ScreenType,
    /// Content refresh cadence in minutes (minimum 1)
    pub update_cycle_minutes: u32,
    pub audio_enabled: bool,
    pub timezone: String,
    pub footer_enabled: bool,
    pub status: ScreenStatus,
    /// Set when a pairing completes
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_type_serialization() {
        assert_eq!(
            serde_json::to_value(ScreenType::TvHorizontal).unwrap(),
            "tv_horizontal"
        );
        assert_eq!(serde_json::to_value(ScreenType::Led).unwrap(), "led");
    }

    #[test]
    fn test_screen_type_labels() {
        assert_eq!(ScreenType::TvVertical.label(), "Vertical TV");
        assert_eq!(ScreenType::Led.label(), "LED Panel");
    }

    #[test]
    fn test_screen_config_type_field_name() {
        let config = ScreenConfig {
            id: Uuid::new_v4(),
            name: "Entrance".to_string(),
            screen_type: ScreenType::TvVertical,
            update_cycle_minutes: 15,
            audio_enabled: true,
            timezone: "America/Sao_Paulo".to_string(),
            footer_enabled: false,
            status: ScreenStatus::Active,
            last_synced_at: None,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "tv_vertical");
        assert_eq!(json["status"], "active");
    }
}
