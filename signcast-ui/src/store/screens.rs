//! Screen configuration operations
//!
//! Screens live inside their terminal. Every mutation recomputes the
//! terminal's denormalized screen summary so list views stay consistent.

use serde::Deserialize;
use signcast_common::types::{Playlist, ScreenConfig, ScreenStatus, ScreenType};
use signcast_common::{Error, Result};
use uuid::Uuid;

use super::core::Store;

fn default_update_cycle() -> u32 {
    30
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_footer() -> bool {
    true
}

/// Payload for adding a screen to a terminal
#[derive(Debug, Clone, Deserialize)]
pub struct NewScreen {
    pub name: String,
    #[serde(rename = "type")]
    pub screen_type: ScreenType,
    #[serde(default = "default_update_cycle")]
    pub update_cycle_minutes: u32,
    #[serde(default)]
    pub audio_enabled: bool,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_footer")]
    pub footer_enabled: bool,
}

/// Partial screen update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScreenUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub screen_type: Option<ScreenType>,
    pub update_cycle_minutes: Option<u32>,
    pub audio_enabled: Option<bool>,
    pub timezone: Option<String>,
    pub footer_enabled: Option<bool>,
    pub status: Option<ScreenStatus>,
}

impl Store {
    /// Add a screen to a terminal. New screens start inactive; pairing
    /// activates them. An empty playlist is created alongside.
    pub async fn add_screen(&self, terminal_id: Uuid, new: NewScreen) -> Result<ScreenConfig> {
        let mut inner = self.inner.write().await;
        let terminal = inner.terminal_mut(terminal_id)?;

        let screen = ScreenConfig {
            id: Uuid::new_v4(),
            name: new.name,
            screen_type: new.screen_type,
            update_cycle_minutes: new.update_cycle_minutes.max(1),
            audio_enabled: new.audio_enabled,
            timezone: new.timezone,
            footer_enabled: new.footer_enabled,
            status: ScreenStatus::Inactive,
            last_synced_at: None,
        };

        terminal.screen_configs.push(screen.clone());
        terminal.recompute_screen_summary();
        inner.playlists.insert(screen.id, Playlist::new());

        Ok(screen)
    }

    pub async fn update_screen(
        &self,
        terminal_id: Uuid,
        screen_id: Uuid,
        update: ScreenUpdate,
    ) -> Result<ScreenConfig> {
        let mut inner = self.inner.write().await;
        let terminal = inner.terminal_mut(terminal_id)?;
        let screen = terminal
            .screen_configs
            .iter_mut()
            .find(|s| s.id == screen_id)
            .ok_or_else(|| Error::NotFound(format!("screen {}", screen_id)))?;

        if let Some(name) = update.name {
            screen.name = name;
        }
        if let Some(screen_type) = update.screen_type {
            screen.screen_type = screen_type;
        }
        if let Some(cycle) = update.update_cycle_minutes {
            screen.update_cycle_minutes = cycle.max(1);
        }
        if let Some(audio) = update.audio_enabled {
            screen.audio_enabled = audio;
        }
        if let Some(timezone) = update.timezone {
            screen.timezone = timezone;
        }
        if let Some(footer) = update.footer_enabled {
            screen.footer_enabled = footer;
        }
        if let Some(status) = update.status {
            screen.status = status;
        }

        let updated = screen.clone();
        terminal.recompute_screen_summary();
        Ok(updated)
    }

    /// Remove a screen, its playlist, and any live pairing session
    pub async fn remove_screen(&self, terminal_id: Uuid, screen_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let terminal = inner.terminal_mut(terminal_id)?;

        let before = terminal.screen_configs.len();
        terminal.screen_configs.retain(|s| s.id != screen_id);
        if terminal.screen_configs.len() == before {
            return Err(Error::NotFound(format!("screen {}", screen_id)));
        }
        terminal.recompute_screen_summary();

        inner.playlists.remove(&screen_id);
        inner.pairing.remove(&screen_id);
        Ok(())
    }

    pub async fn get_screen(&self, terminal_id: Uuid, screen_id: Uuid) -> Result<ScreenConfig> {
        let inner = self.inner.read().await;
        inner
            .terminal(terminal_id)?
            .screen_configs
            .iter()
            .find(|s| s.id == screen_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("screen {}", screen_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::terminals::NewTerminal;
    use signcast_common::types::{
        Demographics, OperatingHours, Phones, SiteGallery, SocialClass, Terminal,
        TerminalCategory, WeekDay,
    };

    async fn store_with_terminal() -> (Store, Terminal) {
        let store = Store::new();
        let terminal = store
            .create_terminal(NewTerminal {
                name: "Mercado Municipal".to_string(),
                category: TerminalCategory::Supermarket,
                street: "Av. Sete de Setembro".to_string(),
                number: "1865".to_string(),
                complement: None,
                cep: "80060070".to_string(),
                neighborhood: "Centro".to_string(),
                city: "Curitiba".to_string(),
                state: "PR".to_string(),
                image_url: None,
                coordinates: None,
                phones: Phones::default(),
                operating_hours: OperatingHours {
                    start: "08:00".to_string(),
                    end: "18:00".to_string(),
                    work_days: vec![WeekDay::Monday],
                },
                demographics: Demographics {
                    average_foot_traffic: 500,
                    social_class: vec![SocialClass::C],
                },
                media: SiteGallery::default(),
            })
            .await;
        (store, terminal)
    }

    fn new_screen(name: &str, screen_type: ScreenType) -> NewScreen {
        NewScreen {
            name: name.to_string(),
            screen_type,
            update_cycle_minutes: 30,
            audio_enabled: false,
            timezone: "America/Sao_Paulo".to_string(),
            footer_enabled: true,
        }
    }

    #[tokio::test]
    async fn test_summary_tracks_screen_mutations() {
        let (store, terminal) = store_with_terminal().await;

        let a = store
            .add_screen(terminal.id, new_screen("Entrada", ScreenType::TvHorizontal))
            .await
            .unwrap();
        store
            .add_screen(terminal.id, new_screen("Corredor", ScreenType::Led))
            .await
            .unwrap();

        let t = store.get_terminal(terminal.id).await.unwrap();
        assert_eq!(t.screens.total, 2);
        // New screens start inactive until paired
        assert_eq!(t.screens.available, 0);

        store
            .update_screen(
                terminal.id,
                a.id,
                ScreenUpdate {
                    status: Some(ScreenStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let t = store.get_terminal(terminal.id).await.unwrap();
        assert_eq!(t.screens.available, 1);

        store.remove_screen(terminal.id, a.id).await.unwrap();
        let t = store.get_terminal(terminal.id).await.unwrap();
        assert_eq!(t.screens.total, 1);
        assert_eq!(t.screens.available, 0);
        assert_eq!(t.screens.types.len(), 1);
        assert_eq!(t.screens.types[0].screen_type, ScreenType::Led);
    }

    #[tokio::test]
    async fn test_add_screen_creates_playlist_and_remove_drops_it() {
        let (store, terminal) = store_with_terminal().await;
        let screen = store
            .add_screen(terminal.id, new_screen("Entrada", ScreenType::TvVertical))
            .await
            .unwrap();

        let view = store.get_playlist(screen.id).await.unwrap();
        assert!(view.items.is_empty());

        store.remove_screen(terminal.id, screen.id).await.unwrap();
        assert!(store.get_playlist(screen.id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_cycle_clamped_to_minimum() {
        let (store, terminal) = store_with_terminal().await;
        let screen = store
            .add_screen(terminal.id, new_screen("Entrada", ScreenType::TvHorizontal))
            .await
            .unwrap();

        let updated = store
            .update_screen(
                terminal.id,
                screen.id,
                ScreenUpdate {
                    update_cycle_minutes: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.update_cycle_minutes, 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_screen_fails() {
        let (store, terminal) = store_with_terminal().await;
        assert!(store
            .remove_screen(terminal.id, Uuid::new_v4())
            .await
            .is_err());
    }
}
