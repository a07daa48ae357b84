//! In-memory fleet store
//!
//! **Module Structure:**
//! - `core.rs`: State container, constructors, shared lookups
//! - `terminals.rs`: Terminal CRUD, favorites, filter pipeline
//! - `screens.rs`: Screen configuration under a terminal
//! - `playlists.rs`: Per-screen playlist operations
//! - `media.rs`: Media library CRUD and filtering
//! - `groups.rs`: Media group CRUD
//! - `partnerships.rs`: Partnership pipeline, kanban board, tasks
//! - `dashboard.rs`: Aggregated dashboard summary
//! - `sync.rs`: Screen pairing sessions
//! - `fixtures.rs`: Seed dataset
//!
//! All state is process-local and ephemeral. Handlers take one lock guard
//! per operation and never hold it across an await.

mod core;
pub mod dashboard;
mod fixtures;
mod groups;
mod media;
mod partnerships;
mod playlists;
mod screens;
mod sync;
mod terminals;

pub use core::Store;
pub use dashboard::DashboardSummary;
pub use groups::{GroupDetail, GroupUpsert};
pub use media::{MediaFilter, MediaUpdate, NewMedia};
pub use partnerships::{NewPartnership, NewTask, PartnershipUpdate, StageColumn};
pub use playlists::{PlaylistItemView, PlaylistView};
pub use screens::{NewScreen, ScreenUpdate};
pub use sync::PairingSession;
pub use terminals::{NewTerminal, TerminalFilter, TerminalUpdate, DEFAULT_RADIUS_KM};
