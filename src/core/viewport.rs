use crate::core::{
    camera::{CameraState, CameraUpdate},
    constants,
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6378137.0;
const TILE_SIZE: f64 = 256.0;

/// Manages a view of the map: camera, zoom limits and screen dimensions.
/// Converts geographical coordinates to screen points, taking the camera
/// bearing into account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub camera: CameraState,
    /// The size of the viewport in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(camera: CameraState, size: Point) -> Self {
        Self {
            camera: CameraState {
                zoom: camera.zoom.clamp(constants::MIN_ZOOM, constants::MAX_ZOOM),
                ..camera
            },
            size,
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
        }
    }

    pub fn apply(&mut self, update: &CameraUpdate) {
        let mut next = self.camera.apply(update, self.min_zoom, self.max_zoom);
        next.center = LatLng::new(
            LatLng::clamp_lat(next.center.lat),
            LatLng::wrap_lng(next.center.lng),
        );
        self.camera = next;
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.camera.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);

        let lat = LatLng::clamp_lat(lat_lng.lat);
        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let pixel_x = (x + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;
        let pixel_y = (-y + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Converts a geographical coordinate to a container-relative screen point.
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let center = self.project(&self.camera.center, None);
        let offset = self.project(lat_lng, None).subtract(&center);

        // The map is drawn rotated by -bearing so that the heading points up.
        let (sin, cos) = (-self.camera.bearing).to_radians().sin_cos();
        let rotated = Point::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
        );

        self.half_size().add(&rotated)
    }

    fn half_size(&self) -> Point {
        Point::new(self.size.x / 2.0, self.size.y / 2.0)
    }
}
