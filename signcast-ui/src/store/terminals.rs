//! Terminal operations
//!
//! **Responsibilities:**
//! - Terminal CRUD and favorite toggling
//! - The list filter pipeline (search, status, category, availability,
//!   favorites, radius around a center point)
//! - CEP-based local lookup used as the first geocoding tier

use chrono::Utc;
use serde::Deserialize;
use signcast_common::geo::{format_cep, haversine_km, normalize_cep};
use signcast_common::types::{
    AddressDetails, Coordinates, Demographics, OperatingHours, Phones, ScreenSummary, SiteGallery,
    Terminal, TerminalCategory, TerminalStatus,
};
use signcast_common::Result;
use tracing::debug;
use uuid::Uuid;

use super::core::Store;

/// Radius applied to location searches when the caller does not give one
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Filter pipeline for terminal listing. All present conditions must match.
#[derive(Debug, Clone)]
pub struct TerminalFilter {
    /// Case-insensitive substring against name, neighborhood, city
    pub search: Option<String>,
    pub status: Option<TerminalStatus>,
    pub category: Option<TerminalCategory>,
    /// Keep only terminals with at least one active screen
    pub only_available: bool,
    pub only_favorites: bool,
    /// Center of a radius search. Terminals without coordinates are
    /// excluded while a center is set, and results sort by distance.
    pub near: Option<Coordinates>,
    pub radius_km: f64,
}

impl Default for TerminalFilter {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            category: None,
            only_available: false,
            only_favorites: false,
            near: None,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl TerminalFilter {
    /// Non-geographic conditions
    fn matches(&self, terminal: &Terminal) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = terminal.name.to_lowercase().contains(&needle)
                || terminal.neighborhood.to_lowercase().contains(&needle)
                || terminal.city.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(status) = self.status {
            if terminal.status != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if terminal.category != category {
                return false;
            }
        }
        if self.only_available && terminal.screens.available == 0 {
            return false;
        }
        if self.only_favorites && !terminal.is_favorite {
            return false;
        }
        true
    }
}

/// Payload for terminal registration, already validated by the API layer
#[derive(Debug, Clone, Deserialize)]
pub struct NewTerminal {
    pub name: String,
    pub category: TerminalCategory,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub cep: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub phones: Phones,
    pub operating_hours: OperatingHours,
    pub demographics: Demographics,
    pub media: SiteGallery,
}

/// Partial terminal update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TerminalUpdate {
    pub name: Option<String>,
    pub category: Option<TerminalCategory>,
    pub status: Option<TerminalStatus>,
    pub image_url: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub cep: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub phones: Option<Phones>,
    pub operating_hours: Option<OperatingHours>,
    pub demographics: Option<Demographics>,
    pub media: Option<SiteGallery>,
}

impl Store {
    /// Filtered terminal list. When a center is set the result is sorted by
    /// ascending distance; otherwise insertion order is kept.
    pub async fn list_terminals(&self, filter: &TerminalFilter) -> Vec<Terminal> {
        let inner = self.inner.read().await;

        let mut matched: Vec<(Option<f64>, &Terminal)> = Vec::new();
        for terminal in &inner.terminals {
            if !filter.matches(terminal) {
                continue;
            }
            match filter.near {
                Some(center) => {
                    let Some(coords) = terminal.coordinates else {
                        continue;
                    };
                    let distance = haversine_km(
                        center.latitude,
                        center.longitude,
                        coords.latitude,
                        coords.longitude,
                    );
                    if distance > filter.radius_km {
                        continue;
                    }
                    matched.push((Some(distance), terminal));
                }
                None => matched.push((None, terminal)),
            }
        }

        if filter.near.is_some() {
            matched.sort_by(|a, b| {
                a.0.unwrap_or(f64::MAX).total_cmp(&b.0.unwrap_or(f64::MAX))
            });
        }

        matched.into_iter().map(|(_, t)| t.clone()).collect()
    }

    pub async fn get_terminal(&self, id: Uuid) -> Result<Terminal> {
        let inner = self.inner.read().await;
        inner.terminal(id).cloned()
    }

    /// Register a terminal. New terminals start offline with no screens.
    pub async fn create_terminal(&self, new: NewTerminal) -> Terminal {
        let cep = format_cep(&new.cep);
        let address = format!("{}, {}", new.street, new.number);
        let image_url = new
            .image_url
            .clone()
            .or_else(|| new.media.images.first().cloned());

        let terminal = Terminal {
            id: Uuid::new_v4(),
            name: new.name,
            address,
            neighborhood: new.neighborhood,
            city: new.city,
            state: new.state.to_uppercase(),
            category: new.category,
            status: TerminalStatus::Offline,
            screens: ScreenSummary::default(),
            image_url,
            last_connection: None,
            is_favorite: false,
            coordinates: new.coordinates,
            cep: Some(cep.clone()),
            address_details: Some(AddressDetails {
                street: new.street,
                number: new.number,
                complement: new.complement,
                zip_code: cep,
            }),
            phones: Some(new.phones),
            operating_hours: Some(new.operating_hours),
            demographics: Some(new.demographics),
            media: Some(new.media),
            screen_configs: Vec::new(),
            metrics: None,
        };

        debug!(terminal_id = %terminal.id, name = %terminal.name, "Registered terminal");

        let mut inner = self.inner.write().await;
        inner.terminals.push(terminal.clone());
        terminal
    }

    pub async fn update_terminal(&self, id: Uuid, update: TerminalUpdate) -> Result<Terminal> {
        let mut inner = self.inner.write().await;
        let terminal = inner.terminal_mut(id)?;

        if let Some(name) = update.name {
            terminal.name = name;
        }
        if let Some(category) = update.category {
            terminal.category = category;
        }
        if let Some(status) = update.status {
            if status == TerminalStatus::Online {
                terminal.last_connection = Some(Utc::now());
            }
            terminal.status = status;
        }
        if let Some(image_url) = update.image_url {
            terminal.image_url = Some(image_url);
        }
        if let Some(neighborhood) = update.neighborhood {
            terminal.neighborhood = neighborhood;
        }
        if let Some(city) = update.city {
            terminal.city = city;
        }
        if let Some(state) = update.state {
            terminal.state = state.to_uppercase();
        }
        if let Some(coordinates) = update.coordinates {
            terminal.coordinates = Some(coordinates);
        }
        if let Some(phones) = update.phones {
            terminal.phones = Some(phones);
        }
        if let Some(operating_hours) = update.operating_hours {
            terminal.operating_hours = Some(operating_hours);
        }
        if let Some(demographics) = update.demographics {
            terminal.demographics = Some(demographics);
        }
        if let Some(media) = update.media {
            terminal.media = Some(media);
        }

        // Street/number/complement/CEP changes rebuild the address block
        if update.street.is_some()
            || update.number.is_some()
            || update.complement.is_some()
            || update.cep.is_some()
        {
            let mut details = terminal.address_details.clone().unwrap_or(AddressDetails {
                street: String::new(),
                number: String::new(),
                complement: None,
                zip_code: terminal.cep.clone().unwrap_or_default(),
            });
            if let Some(street) = update.street {
                details.street = street;
            }
            if let Some(number) = update.number {
                details.number = number;
            }
            if let Some(complement) = update.complement {
                details.complement = Some(complement);
            }
            if let Some(cep) = &update.cep {
                let formatted = format_cep(cep);
                details.zip_code = formatted.clone();
                terminal.cep = Some(formatted);
            }
            terminal.address = format!("{}, {}", details.street, details.number);
            terminal.address_details = Some(details);
        }

        Ok(terminal.clone())
    }

    /// Remove a terminal along with its screens' playlists and any live
    /// pairing sessions.
    pub async fn delete_terminal(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let terminal = inner.terminal(id)?;
        let screen_ids: Vec<Uuid> = terminal.screen_configs.iter().map(|s| s.id).collect();

        inner.terminals.retain(|t| t.id != id);
        for screen_id in screen_ids {
            inner.playlists.remove(&screen_id);
            inner.pairing.remove(&screen_id);
        }
        Ok(())
    }

    /// Flip the favorite flag, returning the new value
    pub async fn toggle_favorite(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let terminal = inner.terminal_mut(id)?;
        terminal.is_favorite = !terminal.is_favorite;
        Ok(terminal.is_favorite)
    }

    /// First terminal whose normalized CEP matches and which has coordinates.
    /// Used as the zeroth geocoding tier before any remote lookup.
    pub async fn find_by_cep(&self, cep: &str) -> Option<Coordinates> {
        let wanted = normalize_cep(cep);
        if wanted.is_empty() {
            return None;
        }
        let inner = self.inner.read().await;
        inner.terminals.iter().find_map(|t| {
            let registered = t.cep.as_deref()?;
            if normalize_cep(registered) == wanted {
                t.coordinates
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcast_common::types::WeekDay;

    fn sample_new(name: &str) -> NewTerminal {
        NewTerminal {
            name: name.to_string(),
            category: TerminalCategory::Pharmacy,
            street: "Rua XV de Novembro".to_string(),
            number: "1500".to_string(),
            complement: None,
            cep: "80020310".to_string(),
            neighborhood: "Centro".to_string(),
            city: "Curitiba".to_string(),
            state: "pr".to_string(),
            image_url: None,
            coordinates: None,
            phones: Phones {
                primary: Some("(41) 9 9999-0000".to_string()),
                secondary: None,
            },
            operating_hours: OperatingHours {
                start: "08:00".to_string(),
                end: "18:00".to_string(),
                work_days: vec![WeekDay::Monday, WeekDay::Friday],
            },
            demographics: Demographics {
                average_foot_traffic: 300,
                social_class: vec![signcast_common::types::SocialClass::B],
            },
            media: SiteGallery {
                images: vec!["https://cdn.example.com/site.jpg".to_string()],
                videos: None,
            },
        }
    }

    #[tokio::test]
    async fn test_create_composes_address_and_formats_cep() {
        let store = Store::new();
        let terminal = store.create_terminal(sample_new("Farmácia Central")).await;

        assert_eq!(terminal.address, "Rua XV de Novembro, 1500");
        assert_eq!(terminal.cep.as_deref(), Some("80020-310"));
        assert_eq!(terminal.state, "PR");
        assert_eq!(terminal.status, TerminalStatus::Offline);
        assert!(terminal.screen_configs.is_empty());
        assert_eq!(terminal.screens.total, 0);
        // Falls back to the first gallery image
        assert_eq!(
            terminal.image_url.as_deref(),
            Some("https://cdn.example.com/site.jpg")
        );
    }

    #[tokio::test]
    async fn test_toggle_favorite_twice_restores_state() {
        let store = Store::new();
        let terminal = store.create_terminal(sample_new("Padaria Pão Quente")).await;
        assert!(!terminal.is_favorite);

        let after_first = store.toggle_favorite(terminal.id).await.unwrap();
        assert!(after_first);

        let after_second = store.toggle_favorite(terminal.id).await.unwrap();
        assert!(!after_second);

        let reloaded = store.get_terminal(terminal.id).await.unwrap();
        assert_eq!(reloaded.is_favorite, terminal.is_favorite);
    }

    #[tokio::test]
    async fn test_search_matches_name_neighborhood_city() {
        let store = Store::new();
        store.create_terminal(sample_new("Farmácia Central")).await;
        let mut other = sample_new("Mercado Sul");
        other.neighborhood = "Batel".to_string();
        other.city = "São Paulo".to_string();
        store.create_terminal(other).await;

        let by_name = store
            .list_terminals(&TerminalFilter {
                search: Some("farmácia".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Farmácia Central");

        let by_neighborhood = store
            .list_terminals(&TerminalFilter {
                search: Some("batel".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(by_neighborhood.len(), 1);

        let by_city = store
            .list_terminals(&TerminalFilter {
                search: Some("são paulo".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].name, "Mercado Sul");
    }

    #[tokio::test]
    async fn test_radius_filter_sorts_by_distance_and_skips_unlocated() {
        let store = Store::new();

        let mut near = sample_new("Perto");
        near.coordinates = Some(Coordinates {
            latitude: -25.4284,
            longitude: -49.2733,
        });
        let mut farther = sample_new("Mais Longe");
        farther.coordinates = Some(Coordinates {
            latitude: -25.45,
            longitude: -49.30,
        });
        let unlocated = sample_new("Sem Coordenadas");

        // Insert out of distance order
        store.create_terminal(farther).await;
        store.create_terminal(near).await;
        store.create_terminal(unlocated).await;

        let filter = TerminalFilter {
            near: Some(Coordinates {
                latitude: -25.4284,
                longitude: -49.2733,
            }),
            radius_km: 10.0,
            ..Default::default()
        };
        let result = store.list_terminals(&filter).await;

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Perto");
        assert_eq!(result[1].name, "Mais Longe");
    }

    #[tokio::test]
    async fn test_radius_excludes_beyond_limit() {
        let store = Store::new();
        let mut sao_paulo = sample_new("Terminal SP");
        sao_paulo.coordinates = Some(Coordinates {
            latitude: -23.5505,
            longitude: -46.6333,
        });
        store.create_terminal(sao_paulo).await;

        // Center in Curitiba, ~340 km away
        let filter = TerminalFilter {
            near: Some(Coordinates {
                latitude: -25.4284,
                longitude: -49.2733,
            }),
            radius_km: 10.0,
            ..Default::default()
        };
        assert!(store.list_terminals(&filter).await.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_cep_requires_coordinates() {
        let store = Store::new();
        store.create_terminal(sample_new("Sem Coordenadas")).await;
        assert!(store.find_by_cep("80020-310").await.is_none());

        let mut located = sample_new("Com Coordenadas");
        located.cep = "80010-000".to_string();
        located.coordinates = Some(Coordinates {
            latitude: -25.43,
            longitude: -49.27,
        });
        store.create_terminal(located).await;

        let hit = store.find_by_cep("80010000").await;
        assert!(hit.is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_terminal_fails() {
        let store = Store::new();
        assert!(store.delete_terminal(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_rebuilds_address_block() {
        let store = Store::new();
        let terminal = store.create_terminal(sample_new("Farmácia Central")).await;

        let updated = store
            .update_terminal(
                terminal.id,
                TerminalUpdate {
                    number: Some("2200".to_string()),
                    cep: Some("80250104".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.address, "Rua XV de Novembro, 2200");
        assert_eq!(updated.cep.as_deref(), Some("80250-104"));
        let details = updated.address_details.unwrap();
        assert_eq!(details.number, "2200");
        assert_eq!(details.zip_code, "80250-104");
    }
}
