//! Screen pairing sessions
//!
//! "Sync" is simulated end to end: starting a pairing issues a short-lived
//! 5-digit code, and verifying it stands in for the device handshake. A
//! successful verify activates the screen and stamps `last_synced_at`.
//! Codes are single-use.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use signcast_common::types::{ScreenConfig, ScreenStatus};
use signcast_common::{Error, Result};
use tracing::info;
use uuid::Uuid;

use super::core::Store;

/// Pairing code lifetime
pub const PAIRING_TTL_SECS: i64 = 300;

/// A live pairing session for one screen
#[derive(Debug, Clone, Serialize)]
pub struct PairingSession {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl Store {
    /// Issue a pairing code for a screen, replacing any previous session.
    /// Codes are 5 digits in `10000..=99999` and live for 5 minutes.
    pub async fn start_pairing(
        &self,
        terminal_id: Uuid,
        screen_id: Uuid,
    ) -> Result<PairingSession> {
        let code = rand::thread_rng().gen_range(10000..=99999u32).to_string();
        let session = PairingSession {
            code,
            expires_at: Utc::now() + Duration::seconds(PAIRING_TTL_SECS),
        };

        let mut inner = self.inner.write().await;
        let terminal = inner.terminal(terminal_id)?;
        if !terminal.screen_configs.iter().any(|s| s.id == screen_id) {
            return Err(Error::NotFound(format!("screen {}", screen_id)));
        }
        inner.pairing.insert(screen_id, session.clone());

        info!(%terminal_id, %screen_id, "Pairing session started");
        Ok(session)
    }

    /// Verify a pairing code. On a live matching code the screen becomes
    /// active with `last_synced_at` set and the session is consumed. A wrong
    /// code leaves the session in place so the operator can retry; an expired
    /// or absent session reads as not found.
    pub async fn verify_pairing(
        &self,
        terminal_id: Uuid,
        screen_id: Uuid,
        code: &str,
    ) -> Result<ScreenConfig> {
        let mut inner = self.inner.write().await;

        let session = inner
            .pairing
            .get(&screen_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no pairing session for screen {}", screen_id)))?;

        if Utc::now() > session.expires_at {
            inner.pairing.remove(&screen_id);
            return Err(Error::NotFound(format!(
                "pairing session for screen {} expired",
                screen_id
            )));
        }

        if session.code != code {
            return Err(Error::InvalidInput("incorrect pairing code".to_string()));
        }

        inner.pairing.remove(&screen_id);

        let terminal = inner.terminal_mut(terminal_id)?;
        let screen = terminal
            .screen_configs
            .iter_mut()
            .find(|s| s.id == screen_id)
            .ok_or_else(|| Error::NotFound(format!("screen {}", screen_id)))?;

        screen.status = ScreenStatus::Active;
        screen.last_synced_at = Some(Utc::now());
        let synced = screen.clone();
        terminal.recompute_screen_summary();

        info!(%terminal_id, %screen_id, "Screen paired");
        Ok(synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::screens::NewScreen;
    use crate::store::terminals::NewTerminal;
    use signcast_common::types::{
        Demographics, OperatingHours, Phones, ScreenType, SiteGallery, SocialClass,
        TerminalCategory, WeekDay,
    };

    async fn fleet() -> (Store, Uuid, Uuid) {
        let store = Store::new();
        let terminal = store
            .create_terminal(NewTerminal {
                name: "Posto Central".to_string(),
                category: TerminalCategory::GasStation,
                street: "Av. República Argentina".to_string(),
                number: "900".to_string(),
                complement: None,
                cep: "80240210".to_string(),
                neighborhood: "Água Verde".to_string(),
                city: "Curitiba".to_string(),
                state: "PR".to_string(),
                image_url: None,
                coordinates: None,
                phones: Phones::default(),
                operating_hours: OperatingHours {
                    start: "06:00".to_string(),
                    end: "22:00".to_string(),
                    work_days: vec![WeekDay::Monday],
                },
                demographics: Demographics {
                    average_foot_traffic: 800,
                    social_class: vec![SocialClass::B],
                },
                media: SiteGallery::default(),
            })
            .await;
        let screen = store
            .add_screen(
                terminal.id,
                NewScreen {
                    name: "Bomba 1".to_string(),
                    screen_type: ScreenType::TvHorizontal,
                    update_cycle_minutes: 15,
                    audio_enabled: false,
                    timezone: "America/Sao_Paulo".to_string(),
                    footer_enabled: true,
                },
            )
            .await
            .unwrap();
        (store, terminal.id, screen.id)
    }

    #[tokio::test]
    async fn test_code_shape_and_ttl() {
        let (store, terminal_id, screen_id) = fleet().await;
        let session = store.start_pairing(terminal_id, screen_id).await.unwrap();

        assert_eq!(session.code.len(), 5);
        let value: u32 = session.code.parse().unwrap();
        assert!((10000..=99999).contains(&value));
        assert!(session.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_wrong_code_leaves_screen_and_session_intact() {
        let (store, terminal_id, screen_id) = fleet().await;
        let session = store.start_pairing(terminal_id, screen_id).await.unwrap();

        let err = store
            .verify_pairing(terminal_id, screen_id, "00000")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let screen = store.get_screen(terminal_id, screen_id).await.unwrap();
        assert_eq!(screen.status, ScreenStatus::Inactive);
        assert!(screen.last_synced_at.is_none());

        // Retry with the right code still works
        let synced = store
            .verify_pairing(terminal_id, screen_id, &session.code)
            .await
            .unwrap();
        assert_eq!(synced.status, ScreenStatus::Active);
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let (store, terminal_id, screen_id) = fleet().await;
        let session = store.start_pairing(terminal_id, screen_id).await.unwrap();

        store
            .verify_pairing(terminal_id, screen_id, &session.code)
            .await
            .unwrap();

        let err = store
            .verify_pairing(terminal_id, screen_id, &session.code)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let (store, terminal_id, screen_id) = fleet().await;
        let session = store.start_pairing(terminal_id, screen_id).await.unwrap();

        store
            .inner
            .write()
            .await
            .pairing
            .get_mut(&screen_id)
            .unwrap()
            .expires_at = Utc::now() - Duration::seconds(1);

        let err = store
            .verify_pairing(terminal_id, screen_id, &session.code)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let screen = store.get_screen(terminal_id, screen_id).await.unwrap();
        assert_eq!(screen.status, ScreenStatus::Inactive);
    }

    #[tokio::test]
    async fn test_pairing_updates_screen_summary() {
        let (store, terminal_id, screen_id) = fleet().await;
        let before = store.get_terminal(terminal_id).await.unwrap();
        assert_eq!(before.screens.available, 0);

        let session = store.start_pairing(terminal_id, screen_id).await.unwrap();
        store
            .verify_pairing(terminal_id, screen_id, &session.code)
            .await
            .unwrap();

        let after = store.get_terminal(terminal_id).await.unwrap();
        assert_eq!(after.screens.available, 1);
    }
}
