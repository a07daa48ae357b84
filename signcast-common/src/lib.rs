//! # Signcast Common Library
//!
//! Shared code for the Signcast admin modules including:
//! - Domain types (terminals, screens, media, playlists, groups, partnerships)
//! - Event types (SigncastEvent enum) and the EventBus
//! - Configuration loading and root folder resolution
//! - Duration and geodesic utility functions

pub mod config;
pub mod duration;
pub mod error;
pub mod events;
pub mod geo;
pub mod types;

pub use error::{Error, Result};
