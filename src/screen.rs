//! The map screen: one owner for the session, location tracking, search and
//! markers, driven by [`ScreenEvent`]s on a single thread.

use crate::{
    core::{camera::CameraUpdate, config::ScreenConfig, geo::LatLng},
    input::events::ScreenEvent,
    layers::marker::{MarkerIcon, MarkerLayer},
    map::{
        provider::{MapProvider, StyleRequestId},
        session::{MapSession, StyleEvent, Transition},
    },
    notice::{Notice, NoticeSink},
    permission::{GateOutcome, PermissionGate, PermissionProvider},
    search::{
        backend::{SearchBackend, SearchCompletion},
        coordinator::{SearchCoordinator, SearchOutcome},
        query::Suggestion,
    },
    tracking::LocationTracker,
    Result,
};

pub struct MapScreen<M, B, P, N> {
    config: ScreenConfig,
    session: MapSession<M>,
    tracker: LocationTracker,
    search: SearchCoordinator,
    markers: MarkerLayer,
    backend: B,
    permissions: P,
    notices: N,
    gate: PermissionGate,
    initialized: bool,
}

impl<M, B, P, N> MapScreen<M, B, P, N>
where
    M: MapProvider,
    B: SearchBackend,
    P: PermissionProvider,
    N: NoticeSink,
{
    pub fn new(config: ScreenConfig, map: M, backend: B, permissions: P, notices: N) -> Self {
        Self {
            session: MapSession::new(map, &config),
            tracker: LocationTracker::new(),
            search: SearchCoordinator::new(config.search.clone()),
            markers: MarkerLayer::new(MarkerIcon::default()),
            backend,
            permissions,
            notices,
            gate: PermissionGate::default(),
            initialized: false,
            config,
        }
    }

    /// Serial dispatch entry for every callback the screen receives.
    pub fn handle(&mut self, event: ScreenEvent) -> Result<()> {
        if self.session.is_destroyed() && event != ScreenEvent::Destroy {
            log::trace!("screen destroyed, dropping {}", event.kind());
            return Ok(());
        }

        match event {
            ScreenEvent::Start => self.on_start(),
            ScreenEvent::Stop => self.on_stop(),
            ScreenEvent::Destroy => {
                self.on_destroy();
                Ok(())
            }
            ScreenEvent::PermissionResult {
                request_code,
                granted,
            } => self.on_permission_result(request_code, granted),
            ScreenEvent::StyleLoaded { request, outcome } => self.on_style_loaded(request, outcome),
            ScreenEvent::PositionChanged {
                subscription,
                position,
            } => {
                let map = self.session.provider_mut()?;
                self.tracker.on_position(map, subscription, position);
                Ok(())
            }
            ScreenEvent::BearingChanged {
                subscription,
                bearing,
            } => {
                let map = self.session.provider_mut()?;
                self.tracker.on_bearing(map, subscription, bearing);
                Ok(())
            }
            ScreenEvent::MoveBegin { subscription } => {
                let map = self.session.provider_mut()?;
                self.tracker.on_move_begin(map, subscription);
                Ok(())
            }
            ScreenEvent::Search(completion) => self.on_search_completion(completion),
            ScreenEvent::ZoomIn => self.zoom_in(),
            ScreenEvent::ZoomOut => self.zoom_out(),
            ScreenEvent::Recenter => self.recenter(),
            ScreenEvent::QueryChanged(text) => self.query_changed(&text),
            ScreenEvent::QuerySubmitted(text) => self.submit_query(&text),
        }
    }

    /// Screen creation: gates map initialization on the location permission.
    pub fn on_create(&mut self) -> Result<()> {
        match self.gate.ensure(&mut self.permissions) {
            GateOutcome::Granted => self.initialize_map(),
            _ => Ok(()),
        }
    }

    pub fn on_permission_result(&mut self, request_code: u32, granted: bool) -> Result<()> {
        match self
            .gate
            .on_result(&self.permissions, request_code, granted)
        {
            GateOutcome::Granted => self.initialize_map(),
            GateOutcome::Denied => {
                self.notices.show(Notice::permission_denied());
                Ok(())
            }
            GateOutcome::Requested | GateOutcome::Ignored => Ok(()),
        }
    }

    fn initialize_map(&mut self) -> Result<()> {
        if self.initialized {
            log::debug!("map already initialized");
            return Ok(());
        }
        self.initialized = true;
        self.session.initialize()?;
        Ok(())
    }

    pub fn on_style_loaded(
        &mut self,
        request: StyleRequestId,
        outcome: std::result::Result<(), String>,
    ) -> Result<()> {
        let transition = self
            .session
            .advance(StyleEvent::from_outcome(request, outcome))?;
        self.apply_transition(transition)
    }

    /// Re-issues the failed style load. Does nothing unless the session failed.
    pub fn retry_style(&mut self) -> Result<()> {
        let transition = self.session.retry()?;
        self.apply_transition(transition)
    }

    fn apply_transition(&mut self, transition: Transition) -> Result<()> {
        match transition {
            Transition::Ready => {
                let map = self.session.provider_mut()?;
                self.tracker.engage(map);
            }
            Transition::Failed { stage, message } => {
                self.notices.show(Notice::style_failed(stage, message));
            }
            Transition::Loading(_) | Transition::Ignored => {}
        }
        Ok(())
    }

    pub fn on_start(&mut self) -> Result<()> {
        self.session.start()
    }

    pub fn on_stop(&mut self) -> Result<()> {
        self.session.stop()
    }

    /// Tears everything down. Safe to call more than once.
    pub fn on_destroy(&mut self) {
        if self.session.is_destroyed() {
            return;
        }
        self.search.cancel(&mut self.backend);
        if let Ok(map) = self.session.provider_mut() {
            self.tracker.disengage(map);
            self.markers.clear_all(map);
        }
        self.session.destroy();
        log::info!("map screen destroyed");
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        self.zoom(self.config.camera.zoom_delta)
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        self.zoom(-self.config.camera.zoom_delta)
    }

    fn zoom(&mut self, delta: f64) -> Result<()> {
        if !self.ready_for("zoom") {
            return Ok(());
        }
        self.session.zoom_by(delta)
    }

    /// Follows the user again. A no-op until a location fix has arrived.
    pub fn recenter(&mut self) -> Result<()> {
        let location = match self.tracker.user_location() {
            Some(location) => location,
            None => {
                log::debug!("recenter without a location fix");
                return Ok(());
            }
        };
        let map = self.session.provider_mut()?;
        self.tracker.engage(map);
        self.session.set_camera(CameraUpdate::new().center(location))
    }

    pub fn submit_query(&mut self, text: &str) -> Result<()> {
        if !self.ready_for("search") || text.trim().is_empty() {
            return Ok(());
        }

        self.search.cancel(&mut self.backend);
        let map = self.session.provider_mut()?;
        self.markers.clear_all(map);

        let bias = self.bias_center()?;
        let outcome = self.search.search(&mut self.backend, text, bias);
        self.present(outcome)
    }

    /// Autocomplete lookups; the stored suggestions are read back with
    /// [`MapScreen::suggestions`].
    pub fn query_changed(&mut self, text: &str) -> Result<()> {
        if !self.ready_for("suggestions") {
            return Ok(());
        }
        let bias = self.bias_center()?;
        self.search.query_changed(&mut self.backend, text, bias);
        Ok(())
    }

    pub fn on_search_completion(&mut self, completion: SearchCompletion) -> Result<()> {
        let outcome = self.search.on_completion(&mut self.backend, completion);
        self.present(outcome)
    }

    fn present(&mut self, outcome: SearchOutcome) -> Result<()> {
        match outcome {
            SearchOutcome::Resolved(results) => {
                let map = self.session.provider_mut()?;
                for result in &results {
                    self.markers.add_result(map, result);
                }
                log::info!("showing {} results", self.markers.len());
                if let Some(update) = self.markers.frame_first(self.config.search.result_zoom) {
                    self.session.set_camera(update)?;
                }
            }
            SearchOutcome::NoResults => self.notices.show(Notice::no_results()),
            SearchOutcome::Failed(message) => self.notices.show(Notice::search_failed(message)),
            SearchOutcome::Pending(_) | SearchOutcome::Suggestions(_) | SearchOutcome::Ignored => {}
        }
        Ok(())
    }

    fn bias_center(&self) -> Result<LatLng> {
        match self.tracker.user_location() {
            Some(location) => Ok(location),
            None => Ok(self.session.camera()?.center),
        }
    }

    fn ready_for(&self, action: &str) -> bool {
        if self.session.is_ready() {
            true
        } else {
            log::debug!("ignoring {} while map is {:?}", action, self.session.state());
            false
        }
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn session(&self) -> &MapSession<M> {
        &self.session
    }

    pub fn tracker(&self) -> &LocationTracker {
        &self.tracker
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn search(&self) -> &SearchCoordinator {
        &self.search
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.search.suggestions()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn map(&self) -> &M {
        self.session.provider()
    }

    pub fn map_mut(&mut self) -> Result<&mut M> {
        self.session.provider_mut()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut P {
        &mut self.permissions
    }

    pub fn notices(&self) -> &N {
        &self.notices
    }
}
