//! Prelude module for common placemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use placemap::prelude::*;`

pub use crate::core::{
    camera::{CameraState, CameraUpdate},
    config::{CameraConfig, ScreenConfig, ScreenProfile, SearchConfig, StyleConfig},
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::input::events::ScreenEvent;

pub use crate::layers::marker::{Marker, MarkerIcon, MarkerLayer};

pub use crate::map::{
    headless::HeadlessMap,
    provider::{MapProvider, MarkerId, StyleRequestId, Stream, SubscriptionId},
    session::{MapSession, SessionState, StyleEvent, StyleStage, Transition},
};

pub use crate::notice::{LogNotices, Notice, NoticeKind, NoticeLog, NoticeSink};

pub use crate::permission::{
    GateOutcome, Permission, PermissionGate, PermissionProvider, StaticPermissions,
};

pub use crate::screen::MapScreen;

pub use crate::search::{
    backend::{SearchBackend, SearchCompletion, SearchResponse},
    coordinator::{SearchCoordinator, SearchOutcome},
    photon::PhotonBackend,
    query::{QueryMode, ResultType, SearchQuery, SearchResult, Suggestion},
    token::{RequestId, RequestKind, RequestSlot, RequestToken},
};

pub use crate::tracking::{LocationTracker, TrackingSession};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
