// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the camera screen

mod common;

use common::{Call, CallLog, FakeCamera, FakeStore, device};
use snapcam::app::{
    Action, CameraScreen, CameraStatus, Icon, Screen, ViewModel, ViewState, ViewfinderContent,
};
use snapcam::backends::camera::{BackendError, CameraController, CameraPosition};
use std::sync::Arc;

fn screen_with(camera: FakeCamera, store: FakeStore) -> CameraScreen {
    CameraScreen::new(ViewModel::new(Arc::new(camera), Arc::new(store)))
}

#[tokio::test]
async fn test_appear_starts_then_loads() {
    let log = CallLog::default();
    let screen = screen_with(FakeCamera::new(log.clone()), FakeStore::new(log.clone()));

    screen.on_appear();
    screen.model().settle().await;

    let calls = log.calls();
    assert_eq!(calls[0], Call::Start);
    assert_eq!(log.count(Call::LoadAll), 1);
    assert_eq!(log.count(Call::LoadThumbnail), 1);
    assert_eq!(calls.len(), 3);
}

#[tokio::test]
async fn test_gallery_round_trip_pauses_once_each_way() {
    let log = CallLog::default();
    let mut screen = screen_with(FakeCamera::new(log.clone()), FakeStore::new(log.clone()));
    screen.on_appear();
    screen.model().settle().await;

    screen.on_enter_gallery();
    assert_eq!(screen.screen(), Screen::Gallery);
    assert!(screen.model().camera().is_preview_paused());
    assert_eq!(log.count(Call::SetPaused(true)), 1);

    // Repeated navigation events are absorbed
    screen.on_enter_gallery();
    assert_eq!(log.count(Call::SetPaused(true)), 1);

    screen.on_exit_gallery();
    screen.on_exit_gallery();
    assert_eq!(screen.screen(), Screen::Camera);
    assert!(!screen.model().camera().is_preview_paused());
    assert_eq!(log.count(Call::SetPaused(false)), 1);

    screen.model().settle().await;
}

#[tokio::test]
async fn test_paused_preview_renders_placeholder() {
    let log = CallLog::default();
    let mut screen = screen_with(FakeCamera::new(log.clone()), FakeStore::new(log.clone()));
    screen.on_enter_gallery();

    let view = screen.view();
    assert_eq!(view.viewfinder.content, ViewfinderContent::Paused);
    screen.model().settle().await;
}

#[tokio::test]
async fn test_shutter_press_issues_one_capture() {
    let log = CallLog::default();
    let screen = screen_with(FakeCamera::new(log.clone()), FakeStore::new(log.clone()));
    screen.on_appear();
    screen.model().settle().await;

    screen.on_shutter_pressed();
    screen.model().settle().await;
    assert_eq!(log.count(Call::TakePhoto), 1);

    screen.on_shutter_pressed();
    screen.on_shutter_pressed();
    screen.model().settle().await;
    assert_eq!(log.count(Call::TakePhoto), 3);
}

#[tokio::test]
async fn test_capture_updates_gallery_thumbnail() {
    let log = CallLog::default();
    let mut screen = screen_with(FakeCamera::new(log.clone()), FakeStore::new(log.clone()));
    screen.on_appear();
    screen.model().settle().await;
    assert!(matches!(
        screen.view().control(Action::OpenGallery).icon,
        Icon::Symbol { .. }
    ));

    screen.handle(Action::TakePhoto);
    screen.model().settle().await;

    match &screen.view().control(Action::OpenGallery).icon {
        Icon::Thumbnail(thumbnail) => {
            assert_eq!(thumbnail.path.to_str(), Some("/fake/IMG_1.jpg"));
        }
        other => panic!("expected thumbnail icon, got {:?}", other),
    }
}

#[tokio::test]
async fn test_switch_with_single_device_is_noop() {
    let log = CallLog::default();
    let camera = FakeCamera::new(log.clone()).with_devices(vec![device("Only", CameraPosition::Back)]);
    let mut screen = screen_with(camera, FakeStore::new(log.clone()));
    screen.on_appear();
    screen.model().settle().await;
    let before = screen.view();

    screen.handle(Action::SwitchCamera);
    screen.model().settle().await;

    assert_eq!(log.count(Call::SwitchDevice), 1);
    assert_eq!(screen.model().camera().current_device().unwrap().name, "Only");
    assert_eq!(screen.view(), before);
}

#[tokio::test]
async fn test_unavailable_camera_disables_capture_controls() {
    let log = CallLog::default();
    let camera = FakeCamera::new(log.clone()).failing_start(BackendError::PermissionDenied);
    let mut screen = screen_with(camera, FakeStore::new(log.clone()));
    screen.on_appear();
    screen.model().settle().await;

    let view = screen.view();
    assert_eq!(
        view.viewfinder.content,
        ViewfinderContent::Unavailable("Camera access denied".to_string())
    );
    assert!(!view.control(Action::TakePhoto).enabled);
    assert!(!view.control(Action::SwitchCamera).enabled);

    screen.handle(Action::TakePhoto);
    screen.handle(Action::SwitchCamera);
    screen.model().settle().await;
    assert_eq!(log.count(Call::TakePhoto), 0);
    assert_eq!(log.count(Call::SwitchDevice), 0);

    // The gallery stays reachable
    screen.handle(Action::OpenGallery);
    assert_eq!(screen.screen(), Screen::Gallery);
    screen.model().settle().await;
}

#[test]
fn test_render_is_pure() {
    let state = ViewState {
        preview_frame: None,
        thumbnail: Some(common::thumbnail("/fake/a.jpg")),
        preview_paused: false,
        camera_status: CameraStatus::Running,
        mirror_preview: false,
        notice: None,
    };

    let first = CameraScreen::render(&state);
    let second = CameraScreen::render(&state);
    assert_eq!(first, second);

    let paused = ViewState {
        preview_paused: true,
        ..state.clone()
    };
    assert_ne!(CameraScreen::render(&paused), first);
}

#[tokio::test]
async fn test_live_frame_rendering_follows_device() {
    let log = CallLog::default();
    let camera = Arc::new(FakeCamera::new(log.clone()));
    let model = ViewModel::new(camera.clone(), Arc::new(FakeStore::new(log.clone())));
    let screen = CameraScreen::new(model);

    let frame = camera.publish(common::solid_frame(3));
    match screen.view().viewfinder.content {
        ViewfinderContent::Live { frame: shown, mirrored } => {
            assert!(Arc::ptr_eq(&shown.0, &frame));
            assert!(!mirrored);
        }
        other => panic!("expected live frame, got {:?}", other),
    }

    screen.on_switch_camera_pressed();
    screen.model().settle().await;
    assert_eq!(camera.current_device().unwrap().position, CameraPosition::Front);
    assert!(matches!(
        screen.view().viewfinder.content,
        ViewfinderContent::Live { mirrored: true, .. }
    ));
}
