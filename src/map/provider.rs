//! The map rendering / location SDK as seen from the screen.

use crate::{
    core::{
        camera::{CameraState, CameraUpdate},
        geo::{LatLng, Point},
    },
    layers::marker::Marker,
};

/// Identifies one listener registration on the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Identifies one asynchronous style load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleRequestId(pub u64);

/// Identifies one drawn marker annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Event streams a caller can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Position,
    Bearing,
    /// Start of a manual pan gesture
    MoveBegin,
}

/// External map surface plus its location component.
///
/// Every call returns immediately. Completions and stream updates are
/// delivered later as [`crate::ScreenEvent`]s carrying the returned ids.
pub trait MapProvider {
    /// Starts loading a style; completion arrives as `ScreenEvent::StyleLoaded`.
    fn load_style(&mut self, style: &str, language: &str) -> StyleRequestId;

    fn set_camera(&mut self, update: &CameraUpdate);

    fn camera(&self) -> CameraState;

    fn subscribe(&mut self, stream: Stream) -> SubscriptionId;

    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// Converts a geographic point to a screen point on the map surface.
    fn pixel_for_coordinate(&self, point: LatLng) -> Point;

    /// Sets the screen point gestures (pinch, double tap) are anchored on.
    fn set_gesture_focal_point(&mut self, point: Option<Point>);

    fn set_rendering(&mut self, active: bool);

    fn enable_location_indicator(&mut self, enabled: bool);

    fn add_marker(&mut self, marker: &Marker) -> MarkerId;

    fn remove_marker(&mut self, marker: MarkerId);

    /// Releases the surface. No other call is made afterwards.
    fn release(&mut self);
}
