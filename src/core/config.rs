//! Configuration system for the map screen
//!
//! Settings are grouped by the component that consumes them. A profile
//! resolves to a complete [`ScreenConfig`]; individual fields can be
//! overridden from a JSON file where every field is optional.

use crate::{
    core::{constants, geo::LatLng},
    search::query::ResultType,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenProfile {
    Default,
    /// Japanese labels and results, camera starting over Shibuya.
    Tokyo,
    Custom(ScreenConfig),
}

impl ScreenProfile {
    pub fn resolve(&self) -> ScreenConfig {
        match self {
            Self::Default => ScreenConfig::default(),
            Self::Tokyo => ScreenConfig {
                style: StyleConfig {
                    language: "ja".to_string(),
                    ..StyleConfig::default()
                },
                search: SearchConfig {
                    language: "ja".to_string(),
                    ..SearchConfig::default()
                },
                camera: CameraConfig {
                    initial_center: LatLng::from_lng_lat(139.70, 35.66),
                    ..CameraConfig::default()
                },
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ScreenProfile {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub style: StyleConfig,
    pub search: SearchConfig,
    pub camera: CameraConfig,
}

impl ScreenConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScreenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading screen config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.style.base_style.is_empty() || self.style.overlay_style.is_empty() {
            return Err(Error::Config("style identifiers must not be empty".into()));
        }
        if self.search.limit == 0 {
            return Err(Error::Config("search limit must be at least 1".into()));
        }
        if self.search.result_types.is_empty() {
            return Err(Error::Config("search needs at least one result type".into()));
        }
        if self.camera.min_zoom > self.camera.max_zoom {
            return Err(Error::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.camera.min_zoom, self.camera.max_zoom
            )));
        }
        if !self.camera.initial_center.is_valid() {
            return Err(Error::InvalidCoordinates(self.camera.initial_center.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub base_style: String,
    pub overlay_style: String,
    /// Display language for map labels
    pub language: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_style: constants::DEFAULT_BASE_STYLE.to_string(),
            overlay_style: constants::DEFAULT_OVERLAY_STYLE.to_string(),
            language: constants::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub limit: usize,
    pub language: String,
    pub result_types: Vec<ResultType>,
    pub result_zoom: f64,
    pub min_suggest_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: constants::DEFAULT_SEARCH_LIMIT,
            language: constants::DEFAULT_LANGUAGE.to_string(),
            result_types: vec![ResultType::Poi, ResultType::Address],
            result_zoom: constants::RESULT_ZOOM,
            min_suggest_len: constants::MIN_SUGGEST_QUERY_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_delta: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_center: LatLng::default(),
            initial_zoom: constants::DEFAULT_ZOOM,
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            zoom_delta: constants::DEFAULT_ZOOM_DELTA,
        }
    }
}
