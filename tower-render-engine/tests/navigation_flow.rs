use std::time::Duration;

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::window::{CursorMoved, WindowEvent};

use tower_render_engine::NavigationPlugin;
use tower_render_engine::engine::assets::tower_layout::TowerLayout;
use tower_render_engine::engine::camera::camera_pose::{CameraPose, TowerCamera};
use tower_render_engine::engine::camera::camera_rig::CameraRig;
use tower_render_engine::engine::core::app_state::AppState;
use tower_render_engine::engine::input::input_aggregator::InputAggregator;
use tower_render_engine::engine::input::pointer::PointerTap;
use tower_render_engine::engine::scene::hit_test::hit_targets_for_layout;
use tower_render_engine::rooms::events::{
    ActiveFloorChanged, ExitRoomRequest, FloorChangeRequest, GoToFloorRequest, PickRequest,
    RoomEntered, RoomExited,
};
use tower_render_engine::rooms::room_manager::{RoomManager, RoomState};
use tower_render_engine::rpc::web_rpc::{IncomingRpcMessage, WebRpcPlugin};

const FRAME: Duration = Duration::from_nanos(16_666_667);

#[derive(Resource, Default)]
struct Received {
    entered: Vec<usize>,
    exited: usize,
    floor_changes: Vec<usize>,
    taps: usize,
}

fn record_room_events(
    mut entered: EventReader<RoomEntered>,
    mut exited: EventReader<RoomExited>,
    mut floor_changes: EventReader<ActiveFloorChanged>,
    mut received: ResMut<Received>,
) {
    received.entered.extend(entered.read().map(|e| e.floor));
    received.exited += exited.read().count();
    received.floor_changes.extend(floor_changes.read().map(|e| e.floor));
}

fn record_taps(mut taps: EventReader<PointerTap>, mut received: ResMut<Received>) {
    received.taps += taps.read().count();
}

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_state(AppState::Running)
        .add_plugins(NavigationPlugin)
        .add_plugins(WebRpcPlugin)
        .init_resource::<Received>()
        .add_systems(PostUpdate, (record_room_events, record_taps));

    app.world_mut().spawn((
        TowerCamera,
        Transform::default(),
        Projection::Perspective(PerspectiveProjection::default()),
    ));

    // First frame spawns the hit targets.
    app.update();
    app
}

fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Step until `done` holds, failing after a generous frame budget.
fn step_until(app: &mut App, mut done: impl FnMut(&App) -> bool) {
    for _ in 0..1200 {
        if done(app) {
            return;
        }
        app.update();
    }
    panic!("condition not reached within 1200 frames");
}

fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}

fn wheel(y: f32) -> MouseWheel {
    MouseWheel {
        unit: MouseScrollUnit::Pixel,
        x: 0.0,
        y,
        window: Entity::PLACEHOLDER,
    }
}

fn escape_pressed() -> KeyboardInput {
    KeyboardInput {
        key_code: KeyCode::Escape,
        logical_key: Key::Escape,
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    }
}

fn touch(phase: TouchPhase, x: f32, y: f32) -> TouchInput {
    TouchInput {
        phase,
        position: Vec2::new(x, y),
        window: Entity::PLACEHOLDER,
        force: None,
        id: 7,
    }
}

fn cursor_to(x: f32, y: f32) -> WindowEvent {
    WindowEvent::CursorMoved(CursorMoved {
        window: Entity::PLACEHOLDER,
        position: Vec2::new(x, y),
        delta: None,
    })
}

fn left_button(state: ButtonState) -> WindowEvent {
    WindowEvent::MouseButtonInput(MouseButtonInput {
        button: MouseButton::Left,
        state,
        window: Entity::PLACEHOLDER,
    })
}

fn taps(app: &App) -> usize {
    app.world().resource::<Received>().taps
}

fn room_state(app: &App) -> RoomState {
    app.world().resource::<RoomManager>().state()
}

fn input(app: &App) -> &InputAggregator {
    app.world().resource::<InputAggregator>()
}

/// Ray straight at the front of a floor's pick volume.
fn ray_at_floor(app: &App, floor: usize) -> Ray3d {
    let layout = app.world().resource::<TowerLayout>();
    let (_, transform) = hit_targets_for_layout(layout)
        .into_iter()
        .find(|(target, _)| target.floor == floor)
        .expect("floor has a hit target");
    let origin = transform.translation + Vec3::new(0.0, 0.0, 40.0);
    Ray3d::new(origin, Dir3::NEG_Z)
}

#[test]
fn three_retreats_land_on_floor_five() {
    let mut app = headless_app();
    assert_eq!(input(&app).target_floor(), 8);
    assert_eq!(input(&app).displayed_progress(), 1.0);

    for _ in 0..3 {
        send(&mut app, wheel(-60.0));
        // Outlast the step cooldown before the next gesture.
        step(&mut app, 30);
    }
    assert_eq!(input(&app).target_floor(), 5);

    step_until(&mut app, |app| input(app).velocity() == 0.0);
    assert!((input(&app).displayed_progress() - 0.625).abs() < 1e-3);
    assert_eq!(input(&app).current_floor(), 5);
}

#[test]
fn one_gesture_steps_once_within_the_cooldown() {
    let mut app = headless_app();

    send(&mut app, wheel(-60.0));
    send(&mut app, wheel(-60.0));
    app.update();
    assert_eq!(input(&app).target_floor(), 7);

    send(&mut app, wheel(-120.0));
    app.update();
    assert_eq!(input(&app).target_floor(), 7);
    assert!(input(&app).in_cooldown());
}

#[test]
fn upward_wheel_at_the_roof_stays_clamped() {
    let mut app = headless_app();

    send(&mut app, wheel(80.0));
    step(&mut app, 60);

    assert_eq!(input(&app).target_floor(), 8);
    assert!(input(&app).displayed_progress() <= 1.0);
}

#[test]
fn floor_link_snaps_progress_while_the_camera_glides() {
    let mut app = headless_app();

    send(&mut app, GoToFloorRequest { floor: 2 });
    app.update();
    assert_eq!(input(&app).target_floor(), 2);
    assert_eq!(input(&app).current_floor(), 2);
    assert_eq!(input(&app).displayed_progress(), 0.25);

    let eased = app.world().resource::<CameraRig>().eased_progress();
    assert!(eased < 1.0 && eased > 0.9);

    step_until(&mut app, |app| {
        (app.world().resource::<CameraRig>().eased_progress() - 0.25).abs() < 1e-3
    });
}

#[test]
fn pick_enter_and_exit_restores_the_pre_entry_pose() {
    let mut app = headless_app();
    step(&mut app, 20);

    let pre_entry = *app.world().resource::<CameraPose>();
    let ray = ray_at_floor(&app, 3);
    send(&mut app, PickRequest { ray });
    app.update();

    assert_eq!(room_state(&app), RoomState::Approaching);
    assert!(!app.world().resource::<CameraRig>().is_active());
    assert!(!input(&app).is_enabled());

    // A second pick while approaching is ignored.
    let second = ray_at_floor(&app, 5);
    send(&mut app, PickRequest { ray: second });
    step_until(&mut app, |app| room_state(app) == RoomState::Inside);
    let room = app.world().resource::<RoomManager>();
    assert_eq!(room.active_floor(), Some(3));
    app.update();
    assert_eq!(app.world().resource::<Received>().entered, vec![3]);

    // Wheel input is suspended inside the room.
    send(&mut app, wheel(-200.0));
    app.update();
    assert_eq!(input(&app).target_floor(), 8);

    send(&mut app, ExitRoomRequest);
    app.update();
    assert_eq!(room_state(&app), RoomState::Exiting);

    step_until(&mut app, |app| room_state(app) == RoomState::Exploring);
    let pose = app.world().resource::<CameraPose>();
    assert!(pose.position.distance(pre_entry.position) < 1e-4);
    assert!((pose.fov_degrees - pre_entry.fov_degrees).abs() < 1e-4);
    assert!(app.world().resource::<CameraRig>().is_active());
    assert!(input(&app).is_enabled());

    app.update();
    assert_eq!(app.world().resource::<Received>().exited, 1);
}

#[test]
fn escape_leaves_the_room() {
    let mut app = headless_app();

    send(&mut app, escape_pressed());
    app.update();
    assert_eq!(room_state(&app), RoomState::Exploring);

    let ray = ray_at_floor(&app, 8);
    send(&mut app, PickRequest { ray });
    step_until(&mut app, |app| room_state(app) == RoomState::Inside);
    assert_eq!(
        app.world().resource::<RoomManager>().active_floor(),
        Some(8)
    );

    send(&mut app, escape_pressed());
    app.update();
    assert_eq!(room_state(&app), RoomState::Exiting);
    step_until(&mut app, |app| room_state(app) == RoomState::Exploring);
}

#[test]
fn elevator_moves_between_rooms() {
    let mut app = headless_app();

    let ray = ray_at_floor(&app, 2);
    send(&mut app, PickRequest { ray });
    step_until(&mut app, |app| room_state(app) == RoomState::Inside);

    send(&mut app, FloorChangeRequest { floor: 8 });
    app.update();
    assert!(app.world().resource::<RoomManager>().is_transitioning());

    // Exit is refused while the ride is in flight.
    send(&mut app, ExitRoomRequest);
    app.update();
    assert_eq!(room_state(&app), RoomState::Inside);

    step_until(&mut app, |app| {
        !app.world().resource::<RoomManager>().is_transitioning()
    });
    app.update();
    assert_eq!(
        app.world().resource::<RoomManager>().active_floor(),
        Some(8)
    );
    assert_eq!(app.world().resource::<Received>().floor_changes, vec![8]);
    assert_eq!(room_state(&app), RoomState::Inside);
}

#[test]
fn camera_transform_follows_the_pose() {
    let mut app = headless_app();
    step(&mut app, 5);

    let pose = *app.world().resource::<CameraPose>();
    let mut cameras = app
        .world_mut()
        .query_filtered::<&Transform, With<TowerCamera>>();
    let transform = cameras.single(app.world()).expect("one tower camera");

    assert!(transform.translation.distance(pose.position) < 1e-5);
    let forward = transform.forward();
    let expected = (pose.look_at - pose.position).normalize();
    assert!(forward.dot(expected) > 0.9999);
}

#[test]
fn rpc_floor_link_reaches_the_input() {
    let mut app = headless_app();

    send(
        &mut app,
        IncomingRpcMessage {
            content: r#"{"jsonrpc":"2.0","method":"go_to_floor","params":{"floor":-3},"id":1}"#
                .to_string(),
        },
    );
    app.update();

    assert_eq!(input(&app).target_floor(), 0);
}

#[test]
fn touch_swipe_steps_once_without_a_tap() {
    let mut app = headless_app();

    send(&mut app, touch(TouchPhase::Started, 200.0, 400.0));
    app.update();
    send(&mut app, touch(TouchPhase::Moved, 200.0, 370.0));
    app.update();
    send(&mut app, touch(TouchPhase::Moved, 200.0, 340.0));
    app.update();
    send(&mut app, touch(TouchPhase::Ended, 200.0, 340.0));
    app.update();

    assert_eq!(input(&app).target_floor(), 7);
    assert_eq!(taps(&app), 0);
}

#[test]
fn still_short_touch_is_a_tap_without_a_step() {
    let mut app = headless_app();

    send(&mut app, touch(TouchPhase::Started, 200.0, 400.0));
    app.update();
    send(&mut app, touch(TouchPhase::Ended, 201.0, 402.0));
    app.update();

    assert_eq!(input(&app).target_floor(), 8);
    assert_eq!(taps(&app), 1);
}

#[test]
fn mouse_drag_in_one_frame_steps_once_without_a_tap() {
    let mut app = headless_app();

    // Press, move and release all arrive before the next frame.
    send(&mut app, cursor_to(300.0, 300.0));
    send(&mut app, left_button(ButtonState::Pressed));
    send(&mut app, cursor_to(300.0, 280.0));
    send(&mut app, cursor_to(300.0, 255.0));
    send(&mut app, left_button(ButtonState::Released));
    app.update();

    assert_eq!(input(&app).target_floor(), 7);
    assert_eq!(taps(&app), 0);
}

#[test]
fn mouse_click_is_a_tap_without_a_step() {
    let mut app = headless_app();

    send(&mut app, cursor_to(300.0, 300.0));
    app.update();
    send(&mut app, left_button(ButtonState::Pressed));
    app.update();
    send(&mut app, cursor_to(301.0, 302.0));
    send(&mut app, left_button(ButtonState::Released));
    app.update();

    assert_eq!(input(&app).target_floor(), 8);
    assert_eq!(taps(&app), 1);
}
