#![allow(dead_code)]

use placemap::prelude::*;

/// Backend that records every call and answers only when told to.
#[derive(Default)]
pub struct ScriptedBackend {
    pub searches: Vec<(RequestId, SearchQuery, QueryMode)>,
    pub selects: Vec<(RequestId, Suggestion)>,
    pub cancels: Vec<RequestId>,
    /// When set, every request is refused with this message
    pub refuse: Option<String>,
}

impl ScriptedBackend {
    pub fn last_request(&self) -> RequestId {
        let search = self.searches.last().map(|(id, _, _)| *id);
        let select = self.selects.last().map(|(id, _)| *id);
        search.max(select).expect("no request issued")
    }

    pub fn last_query(&self) -> &SearchQuery {
        &self.searches.last().expect("no search issued").1
    }
}

impl SearchBackend for ScriptedBackend {
    fn search(&mut self, request: RequestId, query: &SearchQuery, mode: QueryMode) -> placemap::Result<()> {
        if let Some(message) = &self.refuse {
            return Err(MapError::InvalidState(message.clone()));
        }
        self.searches.push((request, query.clone(), mode));
        Ok(())
    }

    fn select(&mut self, request: RequestId, suggestion: &Suggestion) -> placemap::Result<()> {
        self.selects.push((request, suggestion.clone()));
        Ok(())
    }

    fn cancel(&mut self, request: RequestId) {
        self.cancels.push(request);
    }
}

pub type TestScreen = MapScreen<HeadlessMap, ScriptedBackend, StaticPermissions, NoticeLog>;

pub fn screen_with(config: ScreenConfig, permissions: StaticPermissions) -> TestScreen {
    let map = HeadlessMap::new(Point::new(1080.0, 1920.0)).auto_complete_styles(true);
    MapScreen::new(config, map, ScriptedBackend::default(), permissions, NoticeLog::new())
}

/// A screen that has been created, started and reached `Ready`.
pub fn ready_screen(config: ScreenConfig) -> TestScreen {
    let mut screen = screen_with(config, StaticPermissions::granted());
    screen.on_create().unwrap();
    screen.on_start().unwrap();
    pump(&mut screen);
    assert!(screen.session().is_ready());
    screen
}

/// Dispatches queued map events until the map is quiet.
pub fn pump(screen: &mut TestScreen) {
    loop {
        let events = screen.map_mut().unwrap().take_events();
        if events.is_empty() {
            break;
        }
        for event in events {
            screen.handle(event).unwrap();
        }
    }
}

pub fn result(name: &str, lng: f64, lat: f64) -> SearchResult {
    SearchResult {
        name: name.to_string(),
        address: None,
        coordinate: Some(LatLng::from_lng_lat(lng, lat)),
        result_type: Some(ResultType::Poi),
    }
}

pub fn respond(screen: &mut TestScreen, request: RequestId, response: SearchResponse) {
    screen
        .handle(ScreenEvent::Search(SearchCompletion::new(request, response)))
        .unwrap();
}
