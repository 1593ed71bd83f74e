use crate::{
    core::{camera::CameraUpdate, constants, geo::LatLng},
    map::provider::{MapProvider, MarkerId},
    search::query::SearchResult,
};
use serde::{Deserialize, Serialize};

/// Image drawn for a marker plus its size and hot-spot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub image: String,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

impl MarkerIcon {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            image: constants::DEFAULT_MARKER_ICON.to_string(),
            size: constants::MARKER_ICON_SIZE,
            anchor: constants::MARKER_ICON_ANCHOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    position: LatLng,
    icon: MarkerIcon,
    title: Option<String>,
}

impl Marker {
    pub fn new(position: LatLng, icon: MarkerIcon) -> Self {
        Self {
            position,
            icon,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Owns the set of markers drawn for the latest search. The only mutation
/// pattern is clear-then-rebuild: markers are never moved or updated.
pub struct MarkerLayer {
    icon: MarkerIcon,
    drawn: Vec<(MarkerId, Marker)>,
}

impl MarkerLayer {
    pub fn new(icon: MarkerIcon) -> Self {
        Self {
            icon,
            drawn: Vec::new(),
        }
    }

    /// Removes every drawn marker. Returns how many were removed.
    pub fn clear_all(&mut self, map: &mut dyn MapProvider) -> usize {
        let removed = self.drawn.len();
        for (id, _) in self.drawn.drain(..) {
            map.remove_marker(id);
        }
        if removed > 0 {
            log::debug!("cleared {} markers", removed);
        }
        removed
    }

    pub fn add_marker(&mut self, map: &mut dyn MapProvider, point: LatLng, icon: MarkerIcon) -> MarkerId {
        self.draw(map, Marker::new(point, icon))
    }

    /// Draws a marker for a search result with the layer's icon. Results
    /// without a coordinate are skipped.
    pub fn add_result(&mut self, map: &mut dyn MapProvider, result: &SearchResult) -> Option<MarkerId> {
        let point = result.coordinate?;
        let marker = Marker::new(point, self.icon.clone()).with_title(result.name.clone());
        Some(self.draw(map, marker))
    }

    fn draw(&mut self, map: &mut dyn MapProvider, marker: Marker) -> MarkerId {
        let id = map.add_marker(&marker);
        self.drawn.push((id, marker));
        id
    }

    /// Camera update centering the first marker at `zoom`.
    pub fn frame_first(&self, zoom: f64) -> Option<CameraUpdate> {
        self.first()
            .map(|marker| CameraUpdate::new().center(marker.position()).zoom(zoom))
    }

    pub fn first(&self) -> Option<&Marker> {
        self.drawn.first().map(|(_, marker)| marker)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.drawn.iter().map(|(_, marker)| marker)
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new(MarkerIcon::default())
    }
}
