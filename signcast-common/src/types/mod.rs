//! Domain types shared across Signcast modules

pub mod group;
pub mod media;
pub mod partnership;
pub mod playlist;
pub mod screen;
pub mod terminal;

pub use group::Group;
pub use media::{Media, MediaOrientation, MediaStatus, MediaType};
pub use partnership::{Partnership, PartnershipStage, PartnershipTask};
pub use playlist::{default_item_duration, MoveDirection, Playlist, PlaylistItem};
pub use screen::{ScreenConfig, ScreenStatus, ScreenType};
pub use terminal::{
    AddressDetails, Coordinates, Demographics, OperatingHours, Phones, ScreenSummary,
    ScreenTypeCount, SiteGallery, SocialClass, Terminal, TerminalCategory, TerminalMetrics,
    TerminalStatus, WeekDay,
};
