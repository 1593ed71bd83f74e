//! Lifecycle, permission, style loading and location tracking through the
//! screen's event dispatch.

mod support;

use placemap::prelude::*;
use support::{pump, ready_screen, screen_with};

#[test]
fn test_permission_denial_never_initializes_map() {
    let mut screen = screen_with(ScreenConfig::default(), StaticPermissions::denied());
    screen.on_create().unwrap();
    assert_eq!(screen.permissions_mut().requests(), &[1001]);

    screen
        .handle(ScreenEvent::PermissionResult {
            request_code: 1001,
            granted: false,
        })
        .unwrap();
    pump(&mut screen);

    assert_eq!(screen.notices().count(NoticeKind::PermissionDenied), 1);
    assert_eq!(screen.session().state(), &SessionState::Uninitialized);
    assert!(screen.map().loaded_styles().is_empty());
    assert!(!screen.is_initialized());
}

#[test]
fn test_permission_grant_initializes_exactly_once() {
    let mut screen = screen_with(ScreenConfig::default(), StaticPermissions::denied());
    screen.on_create().unwrap();
    screen.permissions_mut().set_granted(true);

    let grant = ScreenEvent::PermissionResult {
        request_code: 1001,
        granted: true,
    };
    screen.handle(grant.clone()).unwrap();
    pump(&mut screen);
    assert!(screen.session().is_ready());

    screen.handle(grant).unwrap();
    screen.on_create().unwrap();
    pump(&mut screen);

    assert_eq!(screen.map().loaded_styles().len(), 2);
    assert_eq!(screen.permissions_mut().requests().len(), 1);
}

#[test]
fn test_unknown_request_code_is_ignored() {
    let mut screen = screen_with(ScreenConfig::default(), StaticPermissions::denied());
    screen.on_create().unwrap();

    screen
        .handle(ScreenEvent::PermissionResult {
            request_code: 42,
            granted: false,
        })
        .unwrap();

    assert!(screen.notices().notices().is_empty());
    assert_eq!(screen.session().state(), &SessionState::Uninitialized);
}

#[test]
fn test_styles_load_in_order_with_language() {
    let config = ScreenProfile::Tokyo.resolve();
    let map = HeadlessMap::new(Point::new(1080.0, 1920.0));
    let mut screen = MapScreen::new(
        config,
        map,
        support::ScriptedBackend::default(),
        StaticPermissions::granted(),
        NoticeLog::new(),
    );
    screen.on_create().unwrap();

    let base = screen.map().pending_style_requests()[0];
    screen.map_mut().unwrap().complete_style(base, Ok(()));
    pump(&mut screen);
    assert!(!screen.map().location_indicator_enabled());
    assert!(!screen.session().is_ready());

    let overlay = screen.map().pending_style_requests()[0];
    screen.map_mut().unwrap().complete_style(overlay, Ok(()));
    pump(&mut screen);

    assert!(screen.session().is_ready());
    assert!(screen.map().location_indicator_enabled());
    assert_eq!(
        screen.map().loaded_styles(),
        &[
            ("mapbox://styles/mapbox/streets-v12".to_string(), "ja".to_string()),
            ("placemap-overlay".to_string(), "ja".to_string()),
        ]
    );
}

#[test]
fn test_style_failure_then_retry_reaches_ready() {
    let mut screen = screen_with(ScreenConfig::default(), StaticPermissions::granted());
    screen.map_mut().unwrap().fail_next_style("tile server unreachable");
    screen.on_create().unwrap();
    pump(&mut screen);

    assert!(matches!(
        screen.session().state(),
        SessionState::Failed {
            stage: StyleStage::Base,
            ..
        }
    ));
    assert_eq!(screen.notices().count(NoticeKind::StyleLoadFailed), 1);
    assert!(!screen.tracker().is_tracking());

    screen.retry_style().unwrap();
    pump(&mut screen);

    assert!(screen.session().is_ready());
    assert!(screen.tracker().is_tracking());
}

#[test]
fn test_position_updates_follow_user() {
    let mut screen = ready_screen(ScreenConfig::default());
    let fix = LatLng::from_lng_lat(139.70, 35.66);

    screen.map_mut().unwrap().push_position(fix);
    screen.map_mut().unwrap().push_bearing(90.0);
    pump(&mut screen);

    let camera = screen.session().camera().unwrap();
    assert_eq!(camera.center, fix);
    assert_eq!(camera.bearing, 90.0);
    assert_eq!(screen.tracker().user_location(), Some(fix));
    assert_eq!(
        screen.map().focal_point(),
        Some(screen.map().pixel_for_coordinate(fix))
    );
}

#[test]
fn test_drag_drops_all_tracking_at_once() {
    let mut screen = ready_screen(ScreenConfig::default());
    assert_eq!(screen.map().total_subscriptions(), 3);

    screen.map_mut().unwrap().begin_drag();
    pump(&mut screen);

    assert_eq!(screen.map().subscription_count(Stream::Position), 0);
    assert_eq!(screen.map().subscription_count(Stream::Bearing), 0);
    assert_eq!(screen.map().subscription_count(Stream::MoveBegin), 0);
    assert!(!screen.tracker().is_tracking());

    let before = screen.session().camera().unwrap();
    screen
        .map_mut()
        .unwrap()
        .push_position(LatLng::from_lng_lat(2.35, 48.85));
    pump(&mut screen);
    assert_eq!(screen.session().camera().unwrap(), before);
}

#[test]
fn test_recenter_without_fix_is_noop() {
    let mut screen = ready_screen(ScreenConfig::default());
    screen.map_mut().unwrap().begin_drag();
    pump(&mut screen);

    let before = screen.session().camera().unwrap();
    screen.handle(ScreenEvent::Recenter).unwrap();

    assert!(!screen.tracker().is_tracking());
    assert_eq!(screen.session().camera().unwrap(), before);
}

#[test]
fn test_recenter_resumes_tracking_on_last_fix() {
    let mut screen = ready_screen(ScreenConfig::default());
    let fix = LatLng::from_lng_lat(139.70, 35.66);
    screen.map_mut().unwrap().push_position(fix);
    pump(&mut screen);

    screen.map_mut().unwrap().begin_drag();
    pump(&mut screen);
    screen.map_mut().unwrap().set_camera(
        &CameraUpdate::new().center(LatLng::from_lng_lat(-0.12, 51.5)),
    );

    screen.handle(ScreenEvent::Recenter).unwrap();

    assert!(screen.tracker().is_tracking());
    assert_eq!(screen.map().total_subscriptions(), 3);
    assert_eq!(screen.session().camera().unwrap().center, fix);
}

#[test]
fn test_stop_and_start_only_toggle_rendering() {
    let mut screen = ready_screen(ScreenConfig::default());
    assert!(screen.map().is_rendering());

    screen.handle(ScreenEvent::Stop).unwrap();
    assert!(!screen.map().is_rendering());
    assert!(screen.tracker().is_tracking());

    screen.handle(ScreenEvent::Start).unwrap();
    assert!(screen.map().is_rendering());
    assert_eq!(screen.map().total_subscriptions(), 3);
}

#[test]
fn test_zoom_buttons_step_by_one_level() {
    let mut screen = ready_screen(ScreenConfig::default());
    let start = screen.session().camera().unwrap().zoom;

    screen.handle(ScreenEvent::ZoomIn).unwrap();
    assert_eq!(screen.session().camera().unwrap().zoom, start + 1.0);

    screen.handle(ScreenEvent::ZoomOut).unwrap();
    screen.handle(ScreenEvent::ZoomOut).unwrap();
    assert_eq!(screen.session().camera().unwrap().zoom, start - 1.0);
}

#[test]
fn test_zoom_before_ready_is_ignored() {
    let mut screen = screen_with(ScreenConfig::default(), StaticPermissions::denied());
    screen.on_create().unwrap();

    screen.handle(ScreenEvent::ZoomIn).unwrap();
    assert_eq!(screen.map().camera().zoom, 0.0);
}

#[test]
fn test_destroy_releases_everything_once() {
    let mut screen = ready_screen(ScreenConfig::default());

    screen.handle(ScreenEvent::Destroy).unwrap();
    screen.handle(ScreenEvent::Destroy).unwrap();

    assert!(screen.session().is_destroyed());
    assert!(screen.map().is_released());
    assert!(!screen.map().is_rendering());
    assert_eq!(screen.map().total_subscriptions(), 0);
    assert!(matches!(
        screen.session().camera(),
        Err(MapError::SessionDestroyed)
    ));

    // callbacks arriving after teardown are dropped
    screen.handle(ScreenEvent::ZoomIn).unwrap();
    screen.handle(ScreenEvent::Start).unwrap();
    assert!(!screen.map().is_rendering());
}

#[test]
fn test_prompt_answer_follows_provider_state() {
    for allow in [true, false] {
        let mut screen = screen_with(ScreenConfig::default(), StaticPermissions::denied());
        screen.on_create().unwrap();
        screen.permissions_mut().set_granted(allow);

        let request_code = screen.permissions().requests()[0];
        let granted = screen.permissions().is_granted(Permission::FineLocation);
        screen
            .handle(ScreenEvent::PermissionResult {
                request_code,
                granted,
            })
            .unwrap();
        pump(&mut screen);

        assert_eq!(screen.session().is_ready(), allow);
        assert_eq!(screen.notices().count(NoticeKind::PermissionDenied), usize::from(!allow));
    }
}
