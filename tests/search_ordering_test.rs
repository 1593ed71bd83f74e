//! Search submission, request ordering and marker presentation.

mod support;

use placemap::prelude::*;
use support::{ready_screen, respond, result, TestScreen};

fn tokyo_screen_with_fix() -> TestScreen {
    let mut screen = ready_screen(ScreenProfile::Tokyo.resolve());
    screen
        .map_mut()
        .unwrap()
        .push_position(LatLng::from_lng_lat(139.70, 35.66));
    support::pump(&mut screen);
    screen
}

#[test]
fn test_only_latest_search_is_applied() {
    let mut screen = ready_screen(ScreenConfig::default());

    for text in ["ramen", "udon", "soba"] {
        screen.handle(ScreenEvent::QuerySubmitted(text.into())).unwrap();
    }
    let ids: Vec<_> = screen.backend().searches.iter().map(|(id, _, _)| *id).collect();
    assert_eq!(screen.backend().cancels, vec![ids[0], ids[1]]);

    // older responses arrive late and out of order
    respond(&mut screen, ids[1], SearchResponse::Results(vec![result("udon", 1.0, 1.0)]));
    respond(&mut screen, ids[0], SearchResponse::Results(Vec::new()));
    assert_eq!(screen.map().marker_count(), 0);
    assert!(screen.notices().notices().is_empty());

    respond(
        &mut screen,
        ids[2],
        SearchResponse::Results(vec![result("soba a", 2.0, 2.0), result("soba b", 3.0, 3.0)]),
    );
    assert_eq!(screen.map().marker_count(), 2);
    assert!(!screen.search().has_pending());
}

#[test]
fn test_coffee_shop_near_shibuya() {
    let mut screen = tokyo_screen_with_fix();

    screen.handle(ScreenEvent::QuerySubmitted("ramen".into())).unwrap();
    let prior = screen.backend().last_request();
    screen.handle(ScreenEvent::QuerySubmitted("coffee shop".into())).unwrap();

    assert_eq!(screen.backend().cancels, vec![prior]);
    let query = screen.backend().last_query();
    assert_eq!(query.text(), "coffee shop");
    assert_eq!(query.proximity().lng_lat(), (139.70, 35.66));
    assert_eq!(query.limit(), 5);
    assert_eq!(query.types(), &[ResultType::Poi, ResultType::Address]);
    assert_eq!(query.primary_language(), Some("ja"));

    let request = screen.backend().last_request();
    respond(
        &mut screen,
        request,
        SearchResponse::Results(vec![
            result("Streamer Coffee", 139.7005, 35.6612),
            result("Little Nap", 139.6925, 35.6700),
            result("Fuglen", 139.6945, 35.6670),
        ]),
    );

    assert_eq!(screen.map().marker_count(), 3);
    let titles: Vec<_> = screen.map().markers().iter().filter_map(|m| m.title()).collect();
    assert_eq!(titles, vec!["Streamer Coffee", "Little Nap", "Fuglen"]);

    let camera = screen.session().camera().unwrap();
    assert_eq!(camera.center, LatLng::from_lng_lat(139.7005, 35.6612));
    assert_eq!(camera.zoom, 14.0);
}

#[test]
fn test_zero_results_shows_one_notice_and_keeps_camera() {
    let mut screen = ready_screen(ScreenConfig::default());

    screen.handle(ScreenEvent::QuerySubmitted("bakery".into())).unwrap();
    let first = screen.backend().last_request();
    respond(&mut screen, first, SearchResponse::Results(vec![result("bakery", 5.0, 5.0)]));
    assert_eq!(screen.map().marker_count(), 1);

    screen
        .handle(ScreenEvent::QuerySubmitted("nothing here".into()))
        .unwrap();
    assert_eq!(screen.map().marker_count(), 0);
    let before = screen.session().camera().unwrap();

    let second = screen.backend().last_request();
    respond(&mut screen, second, SearchResponse::Results(Vec::new()));

    assert_eq!(screen.map().marker_count(), 0);
    assert_eq!(screen.notices().count(NoticeKind::NoResults), 1);
    assert_eq!(screen.notices().notices().len(), 1);
    assert_eq!(screen.session().camera().unwrap(), before);
}

#[test]
fn test_failure_surfaces_message() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.handle(ScreenEvent::QuerySubmitted("museum".into())).unwrap();
    let request = screen.backend().last_request();

    respond(&mut screen, request, SearchResponse::Failed("HTTP 503".into()));

    assert_eq!(screen.notices().count(NoticeKind::SearchFailed), 1);
    assert!(screen.notices().notices()[0].message.contains("HTTP 503"));
    assert_eq!(screen.map().marker_count(), 0);
    assert_eq!(screen.backend().searches.len(), 1);
}

#[test]
fn test_blank_query_changes_nothing() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.handle(ScreenEvent::QuerySubmitted("park".into())).unwrap();
    let request = screen.backend().last_request();
    respond(&mut screen, request, SearchResponse::Results(vec![result("park", 1.0, 1.0)]));

    screen.handle(ScreenEvent::QuerySubmitted("   ".into())).unwrap();

    assert_eq!(screen.backend().searches.len(), 1);
    assert_eq!(screen.map().marker_count(), 1);
}

#[test]
fn test_bias_falls_back_to_camera_center() {
    let mut screen = ready_screen(ScreenProfile::Tokyo.resolve());
    screen.handle(ScreenEvent::QuerySubmitted("sento".into())).unwrap();

    assert_eq!(screen.tracker().user_location(), None);
    assert_eq!(
        screen.backend().last_query().proximity(),
        screen.session().camera().unwrap().center
    );
}

#[test]
fn test_two_phase_search_selects_first_suggestion() {
    let mut screen = tokyo_screen_with_fix();
    screen.handle(ScreenEvent::QuerySubmitted("tower".into())).unwrap();
    let request = screen.backend().last_request();

    respond(
        &mut screen,
        request,
        SearchResponse::Suggestions(vec![
            Suggestion {
                id: "poi.1".into(),
                name: "Tokyo Tower".into(),
                description: Some("Minato".into()),
            },
            Suggestion {
                id: "poi.2".into(),
                name: "Tokyo Skytree".into(),
                description: None,
            },
        ]),
    );

    assert_eq!(screen.backend().selects.len(), 1);
    assert_eq!(screen.backend().selects[0].1.id, "poi.1");
    assert_eq!(screen.map().marker_count(), 0);

    let select = screen.backend().last_request();
    respond(
        &mut screen,
        select,
        SearchResponse::Results(vec![result("Tokyo Tower", 139.7454, 35.6586)]),
    );

    assert_eq!(screen.map().marker_count(), 1);
    assert_eq!(
        screen.session().camera().unwrap().center,
        LatLng::from_lng_lat(139.7454, 35.6586)
    );
}

#[test]
fn test_results_without_coordinates_are_skipped() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.handle(ScreenEvent::QuerySubmitted("library".into())).unwrap();
    let request = screen.backend().last_request();

    let unlocated = SearchResult {
        coordinate: None,
        ..result("Central Library", 0.0, 0.0)
    };
    respond(
        &mut screen,
        request,
        SearchResponse::Results(vec![unlocated, result("Branch Library", 4.0, 4.0)]),
    );

    assert_eq!(screen.map().marker_count(), 1);
    assert_eq!(
        screen.session().camera().unwrap().center,
        LatLng::from_lng_lat(4.0, 4.0)
    );
}

#[test]
fn test_autocomplete_stores_suggestions_only() {
    let mut screen = ready_screen(ScreenConfig::default());
    let before = screen.session().camera().unwrap();

    screen.handle(ScreenEvent::QueryChanged("co".into())).unwrap();
    assert!(screen.backend().searches.is_empty());

    screen.handle(ScreenEvent::QueryChanged("cof".into())).unwrap();
    let (request, query, mode) = screen.backend().searches[0].clone();
    assert_eq!(mode, QueryMode::Suggest);
    assert_eq!(query.text(), "cof");

    respond(
        &mut screen,
        request,
        SearchResponse::Suggestions(vec![Suggestion {
            id: "s".into(),
            name: "Coffee Ya".into(),
            description: None,
        }]),
    );

    assert_eq!(screen.suggestions().len(), 1);
    assert!(screen.backend().selects.is_empty());
    assert_eq!(screen.map().marker_count(), 0);
    assert_eq!(screen.session().camera().unwrap(), before);

    screen.handle(ScreenEvent::QueryChanged("c".into())).unwrap();
    assert!(screen.suggestions().is_empty());
}

#[test]
fn test_submit_preempts_pending_suggestions() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.handle(ScreenEvent::QueryChanged("pizz".into())).unwrap();
    let suggest = screen.backend().last_request();

    screen.handle(ScreenEvent::QuerySubmitted("pizza".into())).unwrap();
    assert_eq!(screen.backend().cancels, vec![suggest]);

    respond(&mut screen, suggest, SearchResponse::Results(vec![result("pizza", 1.0, 1.0)]));
    assert_eq!(screen.map().marker_count(), 0);
    assert!(screen.suggestions().is_empty());
}

#[test]
fn test_typing_after_submit_keeps_search_alive() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.handle(ScreenEvent::QuerySubmitted("coffee".into())).unwrap();
    let request = screen.backend().last_request();

    screen.handle(ScreenEvent::QueryChanged("coffee s".into())).unwrap();
    assert!(screen.backend().cancels.is_empty());
    assert_eq!(screen.backend().searches.len(), 1);

    respond(
        &mut screen,
        request,
        SearchResponse::Results(vec![result("Coffee Ya", 139.70, 35.66)]),
    );
    assert_eq!(screen.map().marker_count(), 1);
}

#[test]
fn test_refused_request_shows_failure() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.backend_mut().refuse = Some("no tokio runtime in scope".into());

    screen.handle(ScreenEvent::QuerySubmitted("museum".into())).unwrap();

    assert_eq!(screen.notices().count(NoticeKind::SearchFailed), 1);
    assert!(screen.notices().notices()[0].message.contains("no tokio runtime"));
    assert!(!screen.search().has_pending());
}

#[test]
fn test_destroy_cancels_live_search() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.handle(ScreenEvent::QuerySubmitted("hotel".into())).unwrap();
    let request = screen.backend().last_request();

    screen.handle(ScreenEvent::Destroy).unwrap();

    assert_eq!(screen.backend().cancels, vec![request]);
    assert!(!screen.search().has_pending());
}

#[test]
fn test_clear_then_add_draws_exactly_n() {
    let mut map = HeadlessMap::new(Point::new(800.0, 600.0));
    let mut layer = MarkerLayer::default();
    for i in 0..4 {
        layer.add_marker(&mut map, LatLng::new(i as f64, 0.0), MarkerIcon::default());
    }

    assert_eq!(layer.clear_all(&mut map), 4);
    for i in 0..3 {
        layer.add_marker(&mut map, LatLng::new(0.0, i as f64), MarkerIcon::default());
    }

    assert_eq!(layer.len(), 3);
    assert_eq!(map.marker_count(), 3);
}
