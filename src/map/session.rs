//! Map surface lifecycle and the style-loading state machine.
//!
//! A session goes `Uninitialized → LoadingBase → LoadingOverlay → Ready`.
//! Every step is driven through [`MapSession::advance`]; a failed load parks
//! the session in `Failed` until [`MapSession::retry`] re-issues that stage.

use crate::{
    core::{
        camera::{CameraState, CameraUpdate},
        config::{CameraConfig, ScreenConfig, StyleConfig},
    },
    map::provider::{MapProvider, StyleRequestId},
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleStage {
    Base,
    Overlay,
}

impl std::fmt::Display for StyleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleStage::Base => write!(f, "base"),
            StyleStage::Overlay => write!(f, "overlay"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    LoadingBase { request: StyleRequestId },
    LoadingOverlay { request: StyleRequestId },
    Ready,
    Failed { stage: StyleStage, message: String },
    Destroyed,
}

/// Inputs to the style state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEvent {
    Initialize,
    Loaded(StyleRequestId),
    LoadFailed(StyleRequestId, String),
    Retry,
}

impl StyleEvent {
    pub fn from_outcome(request: StyleRequestId, outcome: std::result::Result<(), String>) -> Self {
        match outcome {
            Ok(()) => StyleEvent::Loaded(request),
            Err(message) => StyleEvent::LoadFailed(request, message),
        }
    }
}

/// What a call to [`MapSession::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The event did not apply to the current state
    Ignored,
    Loading(StyleStage),
    Ready,
    Failed { stage: StyleStage, message: String },
}

pub struct MapSession<M> {
    provider: M,
    state: SessionState,
    style: StyleConfig,
    camera: CameraConfig,
    rendering: bool,
}

impl<M: MapProvider> MapSession<M> {
    pub fn new(provider: M, config: &ScreenConfig) -> Self {
        Self {
            provider,
            state: SessionState::Uninitialized,
            style: config.style.clone(),
            camera: config.camera.clone(),
            rendering: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == SessionState::Destroyed
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn initialize(&mut self) -> Result<Transition> {
        self.advance(StyleEvent::Initialize)
    }

    pub fn retry(&mut self) -> Result<Transition> {
        self.advance(StyleEvent::Retry)
    }

    /// The single transition function of the style state machine.
    pub fn advance(&mut self, event: StyleEvent) -> Result<Transition> {
        let current = self.state.clone();
        let (next, transition) = match (current, event) {
            (SessionState::Destroyed, _) => return Err(Error::SessionDestroyed),
            (SessionState::Uninitialized, StyleEvent::Initialize) => {
                self.provider.set_camera(
                    &CameraUpdate::new()
                        .center(self.camera.initial_center)
                        .zoom(self.camera.initial_zoom),
                );
                let request = self.load(StyleStage::Base);
                (
                    SessionState::LoadingBase { request },
                    Transition::Loading(StyleStage::Base),
                )
            }
            (SessionState::LoadingBase { request }, StyleEvent::Loaded(id)) if request == id => {
                let request = self.load(StyleStage::Overlay);
                (
                    SessionState::LoadingOverlay { request },
                    Transition::Loading(StyleStage::Overlay),
                )
            }
            (SessionState::LoadingOverlay { request }, StyleEvent::Loaded(id)) if request == id => {
                self.provider.enable_location_indicator(true);
                log::info!("map session ready");
                (SessionState::Ready, Transition::Ready)
            }
            (SessionState::LoadingBase { request }, StyleEvent::LoadFailed(id, message))
                if request == id =>
            {
                self.fail(StyleStage::Base, message)
            }
            (SessionState::LoadingOverlay { request }, StyleEvent::LoadFailed(id, message))
                if request == id =>
            {
                self.fail(StyleStage::Overlay, message)
            }
            (SessionState::Failed { stage, .. }, StyleEvent::Retry) => {
                log::info!("retrying {} style load", stage);
                let request = self.load(stage);
                let next = match stage {
                    StyleStage::Base => SessionState::LoadingBase { request },
                    StyleStage::Overlay => SessionState::LoadingOverlay { request },
                };
                (next, Transition::Loading(stage))
            }
            (state, event) => {
                log::debug!("ignoring style event {:?} in state {:?}", event, state);
                return Ok(Transition::Ignored);
            }
        };

        self.state = next;
        Ok(transition)
    }

    fn load(&mut self, stage: StyleStage) -> StyleRequestId {
        let style = match stage {
            StyleStage::Base => &self.style.base_style,
            StyleStage::Overlay => &self.style.overlay_style,
        };
        log::debug!("loading {} style {}", stage, style);
        self.provider.load_style(style, &self.style.language)
    }

    fn fail(&mut self, stage: StyleStage, message: String) -> (SessionState, Transition) {
        log::warn!("{} style failed to load: {}", stage, message);
        (
            SessionState::Failed {
                stage,
                message: message.clone(),
            },
            Transition::Failed { stage, message },
        )
    }

    pub fn start(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if !self.rendering {
            self.rendering = true;
            self.provider.set_rendering(true);
        }
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if self.rendering {
            self.rendering = false;
            self.provider.set_rendering(false);
        }
        Ok(())
    }

    /// Releases the surface. Returns `false` if the session was already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if self.rendering {
            self.rendering = false;
            self.provider.set_rendering(false);
        }
        self.provider.release();
        self.state = SessionState::Destroyed;
        log::debug!("map session destroyed");
        true
    }

    pub fn zoom_by(&mut self, delta: f64) -> Result<()> {
        let camera = self.camera()?;
        self.set_camera(CameraUpdate::new().zoom(camera.zoom + delta))
    }

    pub fn set_camera(&mut self, update: CameraUpdate) -> Result<()> {
        self.ensure_alive()?;
        let mut update = update;
        if let Some(zoom) = update.zoom {
            update.zoom = Some(zoom.clamp(self.camera.min_zoom, self.camera.max_zoom));
        }
        self.provider.set_camera(&update);
        Ok(())
    }

    pub fn camera(&self) -> Result<CameraState> {
        self.ensure_alive()?;
        Ok(self.provider.camera())
    }

    pub fn provider(&self) -> &M {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> Result<&mut M> {
        self.ensure_alive()?;
        Ok(&mut self.provider)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_destroyed() {
            Err(Error::SessionDestroyed)
        } else {
            Ok(())
        }
    }
}
