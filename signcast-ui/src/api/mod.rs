//! HTTP API handlers for the signage dashboard

pub mod dashboard;
pub mod geocode;
pub mod groups;
pub mod health;
pub mod media;
pub mod partnerships;
pub mod playlists;
pub mod screens;
pub mod sse;
pub mod terminals;
pub mod ui;

pub use dashboard::dashboard_routes;
pub use geocode::geocode_routes;
pub use groups::group_routes;
pub use health::health_routes;
pub use media::media_routes;
pub use partnerships::partnership_routes;
pub use playlists::playlist_routes;
pub use screens::screen_routes;
pub use sse::sse_routes;
pub use terminals::terminal_routes;
pub use ui::ui_routes;
