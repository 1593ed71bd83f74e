//! Camera state of the map surface and partial updates to it.

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// The map's current viewport: center, zoom level and bearing in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LatLng,
    pub zoom: f64,
    pub bearing: f64,
}

impl CameraState {
    pub fn new(center: LatLng, zoom: f64, bearing: f64) -> Self {
        Self {
            center,
            zoom,
            bearing: normalize_bearing(bearing),
        }
    }

    /// Returns the camera that results from applying `update`, with zoom
    /// clamped to `[min_zoom, max_zoom]`.
    pub fn apply(&self, update: &CameraUpdate, min_zoom: f64, max_zoom: f64) -> CameraState {
        CameraState {
            center: update.center.unwrap_or(self.center),
            zoom: update.zoom.unwrap_or(self.zoom).clamp(min_zoom, max_zoom),
            bearing: update.bearing.map(normalize_bearing).unwrap_or(self.bearing),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0, 0.0)
    }
}

/// Normalises a bearing to `[0, 360)`.
pub fn normalize_bearing(bearing: f64) -> f64 {
    let wrapped = bearing % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// A partial camera change. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraUpdate {
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub bearing: Option<f64>,
}

impl CameraUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, center: LatLng) -> Self {
        self.center = Some(center);
        self
    }

    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.center.is_none() && self.zoom.is_none() && self.bearing.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let camera = CameraState::new(LatLng::new(35.66, 139.70), 12.0, 90.0);
        let moved = camera.apply(&CameraUpdate::new().zoom(14.0), 0.0, 22.0);

        assert_eq!(moved.center, camera.center);
        assert_eq!(moved.zoom, 14.0);
        assert_eq!(moved.bearing, 90.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let camera = CameraState::default();
        let moved = camera.apply(&CameraUpdate::new().zoom(40.0), 0.0, 22.0);
        assert_eq!(moved.zoom, 22.0);
    }

    #[test]
    fn test_bearing_normalisation() {
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(450.0), 90.0);
        assert_eq!(normalize_bearing(0.0), 0.0);
    }

    #[test]
    fn test_empty_update() {
        assert!(CameraUpdate::new().is_empty());
        assert!(!CameraUpdate::new().bearing(10.0).is_empty());
    }
}
