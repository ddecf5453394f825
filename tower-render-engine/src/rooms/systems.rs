use super::events::*;
use super::room_manager::{Explorer, RoomManager, RoomNotice};
use crate::engine::assets::tower_layout::{FloorIndex, TowerLayout};
use crate::engine::camera::camera_pose::{CameraPose, TowerCamera};
use crate::engine::camera::camera_rig::CameraRig;
use crate::engine::input::input_aggregator::InputAggregator;
use crate::engine::input::pointer::{PointerTap, PointerTracker};
use crate::engine::scene::hit_test::{HitTarget, nearest_hit};
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::window::CursorMoved;

/// Unproject taps through the tower camera. Taps outside exploration are
/// dropped here so a click on open room content never picks a floor.
pub fn taps_to_pick_rays(
    mut taps: EventReader<PointerTap>,
    room: Res<RoomManager>,
    cameras: Query<(&Camera, &GlobalTransform), With<TowerCamera>>,
    mut picks: EventWriter<PickRequest>,
) {
    for tap in taps.read() {
        if !room.is_exploring() {
            debug!("Tap ignored in state {:?}", room.state());
            continue;
        }
        let Ok((camera, camera_xf)) = cameras.single() else {
            return;
        };
        match camera.viewport_to_world(camera_xf, tap.position) {
            Ok(ray) => {
                picks.write(PickRequest { ray });
            }
            Err(err) => debug!("Tap at {} could not be unprojected: {:?}", tap.position, err),
        }
    }
}

pub fn handle_pick_requests(
    mut picks: EventReader<PickRequest>,
    mut room: ResMut<RoomManager>,
    layout: Res<TowerLayout>,
    mut rig: ResMut<CameraRig>,
    mut input: ResMut<InputAggregator>,
    pose: Res<CameraPose>,
    targets: Query<(&HitTarget, &GlobalTransform)>,
) {
    for pick in picks.read() {
        let explorer = Explorer {
            rig: &mut *rig,
            input: &mut *input,
        };
        match room.handle_pick(pick.ray, &targets, &layout, explorer, &pose) {
            Ok(Some(floor)) => debug!("Picked floor {}", floor),
            Ok(None) => {}
            Err(err) => debug!("Pick rejected: {}", err),
        }
    }
}

/// Apply requests coming from the page or from native callers.
pub fn handle_navigation_requests(
    mut go_to: EventReader<GoToFloorRequest>,
    mut floor_changes: EventReader<FloorChangeRequest>,
    mut exits: EventReader<ExitRoomRequest>,
    mut room: ResMut<RoomManager>,
    layout: Res<TowerLayout>,
    mut rig: ResMut<CameraRig>,
    mut input: ResMut<InputAggregator>,
    pose: Res<CameraPose>,
) {
    for request in go_to.read() {
        if let Err(err) = room.go_to_floor(request.floor, &layout, &mut input) {
            debug!("Floor link ignored: {}", err);
        }
    }

    for request in floor_changes.read() {
        if let Err(err) = room.request_floor_change(request.floor, &layout, &pose) {
            debug!("Elevator request ignored: {}", err);
        }
    }

    for _ in exits.read() {
        let explorer = Explorer {
            rig: &mut *rig,
            input: &mut *input,
        };
        if let Err(err) = room.request_exit(explorer) {
            debug!("Exit request ignored: {}", err);
        }
    }
}

pub fn exit_on_escape(
    mut keys: EventReader<KeyboardInput>,
    room: Res<RoomManager>,
    mut exits: EventWriter<ExitRoomRequest>,
) {
    let escaped = keys
        .read()
        .any(|key| key.key_code == KeyCode::Escape && key.state == ButtonState::Pressed);
    if escaped && room.is_inside() {
        exits.write(ExitRoomRequest);
    }
}

/// Ray-test the cursor against the floor volumes whenever it moves.
pub fn probe_hover(
    mut cursor_moved: EventReader<CursorMoved>,
    tracker: Res<PointerTracker>,
    room: Res<RoomManager>,
    cameras: Query<(&Camera, &GlobalTransform), With<TowerCamera>>,
    targets: Query<(&HitTarget, &GlobalTransform)>,
    mut hovered: Local<Option<FloorIndex>>,
    mut changes: EventWriter<HoverChanged>,
) {
    let moved = cursor_moved.read().last().is_some();

    let floor = if !room.is_exploring() {
        None
    } else if !moved {
        return;
    } else {
        tracker.cursor.and_then(|cursor| {
            let (camera, camera_xf) = cameras.single().ok()?;
            let ray = camera.viewport_to_world(camera_xf, cursor).ok()?;
            nearest_hit(ray, &targets).map(|hit| hit.floor)
        })
    };

    if *hovered != floor {
        *hovered = floor;
        changes.write(HoverChanged { floor });
    }
}

/// Drive the camera from the active script and report completion.
pub fn play_camera_script(
    time: Res<Time>,
    mut room: ResMut<RoomManager>,
    mut pose: ResMut<CameraPose>,
    rig: Res<CameraRig>,
    mut finished: EventWriter<CameraScriptFinished>,
) {
    if room.script().is_none() {
        return;
    }
    if rig.is_active() {
        warn!("Camera rig and scripted transition both active this frame");
    }

    if let Some(kind) = room.advance_script(time.delta_secs(), &mut pose) {
        finished.write(CameraScriptFinished { kind });
    }
}

pub fn handle_script_finished(
    mut finished: EventReader<CameraScriptFinished>,
    mut room: ResMut<RoomManager>,
    mut rig: ResMut<CameraRig>,
    mut input: ResMut<InputAggregator>,
) {
    for event in finished.read() {
        let explorer = Explorer {
            rig: &mut *rig,
            input: &mut *input,
        };
        room.on_script_finished(event.kind, explorer);
    }
}

pub fn publish_room_notices(
    mut room: ResMut<RoomManager>,
    mut entered: EventWriter<RoomEntered>,
    mut exited: EventWriter<RoomExited>,
    mut floor_changed: EventWriter<ActiveFloorChanged>,
) {
    for notice in room.drain_notices() {
        match notice {
            RoomNotice::Entered(floor) => {
                entered.write(RoomEntered { floor });
            }
            RoomNotice::Exited => {
                exited.write(RoomExited);
            }
            RoomNotice::ActiveFloorChanged(floor) => {
                floor_changed.write(ActiveFloorChanged { floor });
            }
        }
    }
}
