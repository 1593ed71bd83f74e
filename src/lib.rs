//! # placemap
//!
//! Coordination layer for a single-screen map application: it gates the map
//! on the location permission, loads the base and overlay styles, follows the
//! user's live location, and searches nearby places, dropping a marker on each
//! result.
//!
//! Rendering, geocoding and result ranking stay with external collaborators,
//! reached through the [`map::MapProvider`], [`search::SearchBackend`],
//! [`permission::PermissionProvider`] and [`notice::NoticeSink`] traits.

pub mod core;
pub mod input;
pub mod layers;
pub mod map;
pub mod notice;
pub mod permission;
pub mod prelude;
pub mod runtime;
pub mod screen;
pub mod search;
pub mod tracking;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    camera::{CameraState, CameraUpdate},
    config::{ScreenConfig, ScreenProfile},
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use input::events::ScreenEvent;

pub use layers::marker::{Marker, MarkerIcon, MarkerLayer};

pub use map::{headless::HeadlessMap, provider::MapProvider, session::MapSession};

pub use notice::{Notice, NoticeKind, NoticeSink};

pub use permission::{Permission, PermissionGate, PermissionProvider};

pub use screen::MapScreen;

pub use search::{
    backend::{SearchBackend, SearchCompletion, SearchResponse},
    coordinator::SearchCoordinator,
    query::{QueryMode, ResultType, SearchQuery, SearchResult, Suggestion},
    token::RequestId,
};

pub use tracking::{LocationTracker, TrackingSession};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Map session has been destroyed")]
    SessionDestroyed,

    #[error("Search backend error: {0}")]
    Backend(String),
}

/// Error type alias for convenience
pub type MapError = Error;
