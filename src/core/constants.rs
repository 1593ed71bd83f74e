//! Screen-wide defaults: style identifiers, search limits and camera bounds.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Request code used for the fine-location permission round trip.
pub const LOCATION_PERMISSION_REQUEST_CODE: u32 = 1001;

/// Base street style loaded first on every session.
pub const DEFAULT_BASE_STYLE: &str = "mapbox://styles/mapbox/streets-v12";

/// Named overlay style loaded once the base style is in place.
pub const DEFAULT_OVERLAY_STYLE: &str = "placemap-overlay";

/// Display and search language when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Maximum number of results requested per search.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Zoom level the camera frames the first search result at.
pub const RESULT_ZOOM: f64 = 14.0;

/// Minimum trimmed input length before suggestion lookups start.
pub const MIN_SUGGEST_QUERY_LEN: usize = 3;

/// Zoom used before the first location fix arrives.
pub const DEFAULT_ZOOM: f64 = 12.0;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

/// Step applied by the zoom-in / zoom-out buttons.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Image name of the marker drawn for each search result.
pub const DEFAULT_MARKER_ICON: &str = "red_marker";

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Photon-compatible geocoding endpoint used by the HTTP backend.
pub const DEFAULT_PHOTON_ENDPOINT: &str = "https://photon.komoot.io/api/";
