//! Terminal: a physical on-site display installation tracked by the dashboard

use crate::types::screen::{ScreenConfig, ScreenStatus, ScreenType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Establishment category of the host site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalCategory {
    Pharmacy,
    LotteryShop,
    Bakery,
    ClothingStore,
    PetShop,
    Mall,
    Supermarket,
    Hospital,
    GasStation,
    Gym,
    FurnitureStore,
    HardwareStore,
    CarDealership,
    Hotel,
    School,
    DentalClinic,
    Laundry,
    FlowerShop,
    JewelryStore,
    ToyStore,
    ComputerStore,
    Bookstore,
    ShoeStore,
    SportsStore,
    CosmeticsStore,
    AccessoriesStore,
    HomeGoodsStore,
    HealthFoodStore,
    MusicStore,
    DecorStore,
    ConvenienceStore,
    Stationery,
    TravelAgency,
    AutoRepairShop,
    FuneralHome,
    CraftStore,
    LiquorStore,
    ElectronicsStore,
    CleaningSuppliesStore,
    SportingGoodsStore,
    BabyStore,
    AdAgency,
    AccountingOffice,
    Barbershop,
    Bank,
    CreditAgency,
    SolarEnergy,
    Engineering,
    Consulting,
    Optician,
    MedicalClinic,
    Grocer,
    InternetProvider,
    Residential,
    Other,
}

impl TerminalCategory {
    /// Human-readable category label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pharmacy => "Pharmacy",
            Self::LotteryShop => "Lottery Shop",
            Self::Bakery => "Bakery",
            Self::ClothingStore => "Clothing Store",
            Self::PetShop => "Pet Shop",
            Self::Mall => "Mall",
            Self::Supermarket => "Supermarket",
            Self::Hospital => "Hospital",
            Self::GasStation => "Gas Station",
            Self::Gym => "Gym",
            Self::FurnitureStore => "Furniture Store",
            Self::HardwareStore => "Hardware Store",
            Self::CarDealership => "Car Dealership",
            Self::Hotel => "Hotel",
            Self::School => "School",
            Self::DentalClinic => "Dental Clinic",
            Self::Laundry => "Laundry",
            Self::FlowerShop => "Flower Shop",
            Self::JewelryStore => "Jewelry Store",
            Self::ToyStore => "Toy Store",
            Self::ComputerStore => "Computer Store",
            Self::Bookstore => "Bookstore",
            Self::ShoeStore => "Shoe Store",
            Self::SportsStore => "Sports Store",
            Self::CosmeticsStore => "Cosmetics Store",
            Self::AccessoriesStore => "Accessories Store",
            Self::HomeGoodsStore => "Home Goods Store",
            Self::HealthFoodStore => "Health Food Store",
            Self::MusicStore => "Music Store",
            Self::DecorStore => "Decor Store",
            Self::ConvenienceStore => "Convenience Store",
            Self::Stationery => "Stationery",
            Self::TravelAgency => "Travel Agency",
            Self::AutoRepairShop => "Auto Repair Shop",
            Self::FuneralHome => "Funeral Home",
            Self::CraftStore => "Craft Store",
            Self::LiquorStore => "Liquor Store",
            Self::ElectronicsStore => "Electronics Store",
            Self::CleaningSuppliesStore => "Cleaning Supplies Store",
            Self::SportingGoodsStore => "Sporting Goods Store",
            Self::BabyStore => "Baby Store",
            Self::AdAgency => "Ad Agency",
            Self::AccountingOffice => "Accounting Office",
            Self::Barbershop => "Barbershop",
            Self::Bank => "Bank",
            Self::CreditAgency => "Credit Agency",
            Self::SolarEnergy => "Solar Energy",
            Self::Engineering => "Engineering",
            Self::Consulting => "Consulting",
            Self::Optician => "Optician",
            Self::MedicalClinic => "Medical Clinic",
            Self::Grocer => "Grocer",
            Self::InternetProvider => "Internet Provider",
            Self::Residential => "Residential",
            Self::Other => "Other",
        }
    }
}

/// Connectivity status of a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    Online,
    Offline,
    Maintenance,
}

/// Economic class bands of the surrounding audience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialClass {
    A,
    B,
    C,
    D,
}

/// Day of the week for operating hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Denormalized screen counts for list views
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenSummary {
    pub total: u32,
    /// Screens currently active (available for new content)
    pub available: u32,
    pub types: Vec<ScreenTypeCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenTypeCount {
    #[serde(rename = "type")]
    pub screen_type: ScreenType,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDetails {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub zip_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phones {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingHours {
    /// Opening time, `HH:MM`
    pub start: String,
    /// Closing time, `HH:MM`
    pub end: String,
    pub work_days: Vec<WeekDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub average_foot_traffic: u32,
    pub social_class: Vec<SocialClass>,
}

/// Site photo/video gallery
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteGallery {
    pub images: Vec<String>,
    pub videos: Option<Vec<String>>,
}

/// Rolling display counters used by the dashboard ranking
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerminalMetrics {
    pub exhibitions: u64,
    pub uptime_pct: u8,
}

/// A physical display installation (kiosk/TV) at a partner site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub category: TerminalCategory,
    pub status: TerminalStatus,
    pub screens: ScreenSummary,
    pub image_url: Option<String>,
    pub last_connection: Option<DateTime<Utc>>,
    pub is_favorite: bool,
    pub coordinates: Option<Coordinates>,
    /// Postal code, stored formatted (`XXXXX-XXX`)
    pub cep: Option<String>,
    pub address_details: Option<AddressDetails>,
    pub phones: Option<Phones>,
    pub operating_hours: Option<OperatingHours>,
    pub demographics: Option<Demographics>,
    pub media: Option<SiteGallery>,
    pub screen_configs: Vec<ScreenConfig>,
    pub metrics: Option<TerminalMetrics>,
}

impl Terminal {
    /// Rebuild the denormalized screen summary from `screen_configs`.
    ///
    /// Must run after every screen mutation so list views stay consistent
    /// with the configured screens.
    pub fn recompute_screen_summary(&mut self) {
        let total = self.screen_configs.len() as u32;
        let available = self
            .screen_configs
            .iter()
            .filter(|s| s.status == ScreenStatus::Active)
            .count() as u32;

        let mut types = Vec::new();
        for screen_type in [ScreenType::TvHorizontal, ScreenType::TvVertical, ScreenType::Led] {
            let count = self
                .screen_configs
                .iter()
                .filter(|s| s.screen_type == screen_type)
                .count() as u32;
            if count > 0 {
                types.push(ScreenTypeCount { screen_type, count });
            }
        }

        self.screens = ScreenSummary {
            total,
            available,
            types,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::screen::ScreenConfig;

    fn terminal_with_screens(screens: Vec<ScreenConfig>) -> Terminal {
        Terminal {
            id: Uuid::new_v4(),
            name: "Test Terminal".to_string(),
            address: "Rua XV de Novembro, 1500".to_string(),
            neighborhood: "Centro".to_string(),
            city: "Curitiba".to_string(),
            state: "PR".to_string(),
            category: TerminalCategory::Pharmacy,
            status: TerminalStatus::Online,
            screens: ScreenSummary::default(),
            image_url: None,
            last_connection: None,
            is_favorite: false,
            coordinates: None,
            cep: Some("80020-310".to_string()),
            address_details: None,
            phones: None,
            operating_hours: None,
            demographics: None,
            media: None,
            screen_configs: screens,
            metrics: None,
        }
    }

    fn screen(screen_type: ScreenType, status: ScreenStatus) -> ScreenConfig {
        ScreenConfig {
            id: Uuid::new_v4(),
            name: "Screen".to_string(),
            screen_type,
            update_cycle_minutes: 30,
            audio_enabled: false,
            timezone: "America/Sao_Paulo".to_string(),
            footer_enabled: true,
            status,
            last_synced_at: None,
        }
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_value(TerminalCategory::GasStation).unwrap();
        assert_eq!(json, "gas_station");
        let back: TerminalCategory = serde_json::from_value(json).unwrap();
        assert_eq!(back, TerminalCategory::GasStation);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(TerminalCategory::Pharmacy.label(), "Pharmacy");
        assert_eq!(TerminalCategory::LotteryShop.label(), "Lottery Shop");
        assert_eq!(TerminalCategory::Other.label(), "Other");
    }

    #[test]
    fn test_recompute_screen_summary() {
        let mut terminal = terminal_with_screens(vec![
            screen(ScreenType::TvHorizontal, ScreenStatus::Active),
            screen(ScreenType::TvHorizontal, ScreenStatus::Inactive),
            screen(ScreenType::Led, ScreenStatus::Active),
        ]);

        terminal.recompute_screen_summary();

        assert_eq!(terminal.screens.total, 3);
        assert_eq!(terminal.screens.available, 2);
        assert_eq!(terminal.screens.types.len(), 2);
        assert_eq!(terminal.screens.types[0].screen_type, ScreenType::TvHorizontal);
        assert_eq!(terminal.screens.types[0].count, 2);
        assert_eq!(terminal.screens.types[1].screen_type, ScreenType::Led);
        assert_eq!(terminal.screens.types[1].count, 1);
    }

    #[test]
    fn test_recompute_screen_summary_empty() {
        let mut terminal = terminal_with_screens(vec![]);
        terminal.recompute_screen_summary();

        assert_eq!(terminal.screens.total, 0);
        assert_eq!(terminal.screens.available, 0);
        assert!(terminal.screens.types.is_empty());
    }
}
