//! Live location tracking
//!
//! While a [`TrackingSession`] is held the camera follows the position and
//! bearing streams. The session is acquired and released as a whole: the
//! position, bearing and pan-gesture listeners come and go together.

use crate::{
    core::{camera::CameraUpdate, geo::LatLng},
    map::provider::{MapProvider, Stream, SubscriptionId},
};

/// The three listener registrations that make up one tracking period.
#[derive(Debug, PartialEq, Eq)]
pub struct TrackingSession {
    position: SubscriptionId,
    bearing: SubscriptionId,
    move_begin: SubscriptionId,
}

impl TrackingSession {
    pub fn acquire(map: &mut dyn MapProvider) -> Self {
        Self {
            position: map.subscribe(Stream::Position),
            bearing: map.subscribe(Stream::Bearing),
            move_begin: map.subscribe(Stream::MoveBegin),
        }
    }

    /// Removes all three listeners. Consumes the session so it cannot be
    /// released twice.
    pub fn release(self, map: &mut dyn MapProvider) {
        map.unsubscribe(self.position);
        map.unsubscribe(self.bearing);
        map.unsubscribe(self.move_begin);
    }

    pub fn owns(&self, subscription: SubscriptionId) -> bool {
        subscription == self.position
            || subscription == self.bearing
            || subscription == self.move_begin
    }
}

#[derive(Debug, Default)]
pub struct LocationTracker {
    session: Option<TrackingSession>,
    user_location: Option<LatLng>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Last position fix, if one has ever been received
    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    /// Starts following the user. Returns `false` if already tracking.
    pub fn engage(&mut self, map: &mut dyn MapProvider) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(TrackingSession::acquire(map));
        log::debug!("camera tracking engaged");
        true
    }

    /// Stops following the user. Returns `false` if not tracking.
    pub fn disengage(&mut self, map: &mut dyn MapProvider) -> bool {
        match self.session.take() {
            Some(session) => {
                session.release(map);
                log::debug!("camera tracking dismissed");
                true
            }
            None => false,
        }
    }

    /// Re-centers on `position` and records it as the user location.
    /// Returns `false` for updates from a listener that is no longer active.
    pub fn on_position(
        &mut self,
        map: &mut dyn MapProvider,
        subscription: SubscriptionId,
        position: LatLng,
    ) -> bool {
        if !self.is_current(subscription, |s| s.position) {
            log::trace!("dropping position update from {:?}", subscription);
            return false;
        }
        map.set_camera(&CameraUpdate::new().center(position));
        let focal = map.pixel_for_coordinate(position);
        map.set_gesture_focal_point(Some(focal));
        self.user_location = Some(position);
        true
    }

    pub fn on_bearing(
        &mut self,
        map: &mut dyn MapProvider,
        subscription: SubscriptionId,
        bearing: f64,
    ) -> bool {
        if !self.is_current(subscription, |s| s.bearing) {
            log::trace!("dropping bearing update from {:?}", subscription);
            return false;
        }
        map.set_camera(&CameraUpdate::new().bearing(bearing));
        true
    }

    /// A manual pan began: drops the whole tracking session in one step.
    pub fn on_move_begin(&mut self, map: &mut dyn MapProvider, subscription: SubscriptionId) -> bool {
        if !self.is_current(subscription, |s| s.move_begin) {
            return false;
        }
        self.disengage(map)
    }

    fn is_current(
        &self,
        subscription: SubscriptionId,
        pick: impl Fn(&TrackingSession) -> SubscriptionId,
    ) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| pick(session) == subscription)
    }
}
