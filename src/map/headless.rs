//! In-memory map surface
//!
//! `HeadlessMap` keeps a [`Viewport`] instead of drawing anything. Work that a
//! real SDK would complete asynchronously (style loads, location fixes, pan
//! gestures) is queued as [`ScreenEvent`]s for the host loop to drain with
//! [`HeadlessMap::take_events`].

use crate::{
    core::{
        camera::{CameraState, CameraUpdate},
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::events::ScreenEvent,
    layers::marker::Marker,
    map::provider::{MapProvider, MarkerId, StyleRequestId, Stream, SubscriptionId},
    prelude::HashMap,
};
use std::collections::VecDeque;

pub struct HeadlessMap {
    viewport: Viewport,
    next_id: u64,
    subscriptions: HashMap<SubscriptionId, Stream>,
    markers: HashMap<MarkerId, Marker>,
    loaded_styles: Vec<(String, String)>,
    pending_styles: Vec<StyleRequestId>,
    auto_complete_styles: bool,
    style_failures: VecDeque<String>,
    rendering: bool,
    location_indicator: bool,
    focal_point: Option<Point>,
    released: bool,
    outbox: VecDeque<ScreenEvent>,
}

impl HeadlessMap {
    pub fn new(size: Point) -> Self {
        Self {
            viewport: Viewport::new(CameraState::default(), size),
            next_id: 1,
            subscriptions: HashMap::default(),
            markers: HashMap::default(),
            loaded_styles: Vec::new(),
            pending_styles: Vec::new(),
            auto_complete_styles: false,
            style_failures: VecDeque::new(),
            rendering: false,
            location_indicator: false,
            focal_point: None,
            released: false,
            outbox: VecDeque::new(),
        }
    }

    /// Completes every style load right away (queued as an event) instead of
    /// waiting for [`HeadlessMap::complete_style`].
    pub fn auto_complete_styles(mut self, enabled: bool) -> Self {
        self.auto_complete_styles = enabled;
        self
    }

    /// Makes the next auto-completed style load fail with `message`.
    pub fn fail_next_style(&mut self, message: impl Into<String>) {
        self.style_failures.push_back(message.into());
    }

    pub fn pending_style_requests(&self) -> &[StyleRequestId] {
        &self.pending_styles
    }

    /// Finishes a pending style load by queuing its completion.
    pub fn complete_style(&mut self, request: StyleRequestId, outcome: Result<(), String>) {
        self.pending_styles.retain(|pending| *pending != request);
        self.outbox
            .push_back(ScreenEvent::StyleLoaded { request, outcome });
    }

    /// Delivers a location fix to every position listener.
    pub fn push_position(&mut self, position: LatLng) {
        for subscription in self.listeners(Stream::Position) {
            self.outbox.push_back(ScreenEvent::PositionChanged {
                subscription,
                position,
            });
        }
    }

    /// Delivers a heading change to every bearing listener.
    pub fn push_bearing(&mut self, bearing: f64) {
        for subscription in self.listeners(Stream::Bearing) {
            self.outbox.push_back(ScreenEvent::BearingChanged {
                subscription,
                bearing,
            });
        }
    }

    /// Simulates the user starting to drag the map.
    pub fn begin_drag(&mut self) {
        for subscription in self.listeners(Stream::MoveBegin) {
            self.outbox
                .push_back(ScreenEvent::MoveBegin { subscription });
        }
    }

    pub fn take_events(&mut self) -> Vec<ScreenEvent> {
        self.outbox.drain(..).collect()
    }

    pub fn subscription_count(&self, stream: Stream) -> usize {
        self.subscriptions.values().filter(|s| **s == stream).count()
    }

    pub fn total_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Drawn markers in the order they were added
    pub fn markers(&self) -> Vec<&Marker> {
        let mut ids: Vec<_> = self.markers.keys().copied().collect();
        ids.sort();
        ids.iter().filter_map(|id| self.markers.get(id)).collect()
    }

    pub fn loaded_styles(&self) -> &[(String, String)] {
        &self.loaded_styles
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn location_indicator_enabled(&self) -> bool {
        self.location_indicator
    }

    pub fn focal_point(&self) -> Option<Point> {
        self.focal_point
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn listeners(&self, stream: Stream) -> Vec<SubscriptionId> {
        let mut ids: Vec<_> = self
            .subscriptions
            .iter()
            .filter(|(_, s)| **s == stream)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MapProvider for HeadlessMap {
    fn load_style(&mut self, style: &str, language: &str) -> StyleRequestId {
        let request = StyleRequestId(self.next_id());
        self.loaded_styles
            .push((style.to_string(), language.to_string()));

        if self.auto_complete_styles {
            let outcome = match self.style_failures.pop_front() {
                Some(message) => Err(message),
                None => Ok(()),
            };
            self.outbox
                .push_back(ScreenEvent::StyleLoaded { request, outcome });
        } else {
            self.pending_styles.push(request);
        }
        request
    }

    fn set_camera(&mut self, update: &CameraUpdate) {
        self.viewport.apply(update);
    }

    fn camera(&self) -> CameraState {
        self.viewport.camera
    }

    fn subscribe(&mut self, stream: Stream) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.subscriptions.insert(id, stream);
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        if self.subscriptions.remove(&subscription).is_none() {
            log::debug!("unsubscribe for unknown subscription {:?}", subscription);
        }
    }

    fn pixel_for_coordinate(&self, point: LatLng) -> Point {
        self.viewport.lat_lng_to_pixel(&point)
    }

    fn set_gesture_focal_point(&mut self, point: Option<Point>) {
        self.focal_point = point;
    }

    fn set_rendering(&mut self, active: bool) {
        self.rendering = active;
    }

    fn enable_location_indicator(&mut self, enabled: bool) {
        self.location_indicator = enabled;
    }

    fn add_marker(&mut self, marker: &Marker) -> MarkerId {
        let id = MarkerId(self.next_id());
        self.markers.insert(id, marker.clone());
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn release(&mut self) {
        self.released = true;
        self.location_indicator = false;
        self.markers.clear();
        self.pending_styles.clear();
        self.outbox.clear();
    }
}
