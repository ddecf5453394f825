use super::camera_script::{AxisTargets, CameraScript, ScriptKind};
use crate::engine::assets::tower_layout::{FloorIndex, TowerLayout};
use crate::engine::assets::tower_manifest::FloorCategory;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use constants::camera::CAMERA_FOV_DEGREES;
use constants::transitions::*;

/// Fly from the exploration orbit into a room.
///
/// The rooftop is reached by hovering above it and descending. Regular floors
/// get a frontal approach and a push through the facade, with a fov pulse.
pub fn room_entry_script(layout: &TowerLayout, floor: FloorIndex) -> CameraScript {
    let script = CameraScript::new(ScriptKind::RoomEntry);

    let script = match layout.category(floor) {
        FloorCategory::Rooftop => {
            let roof_y = layout.rooftop_eye_height();
            script
                .then_move(
                    AxisTargets::all(Vec3::new(0.0, roof_y + ROOF_ENTRY_CLEARANCE, ROOF_ENTRY_HOVER_Z)),
                    ROOF_HOVER_SECS,
                    EaseFunction::QuadraticInOut,
                )
                .then_move(
                    AxisTargets::all(layout.interior_rest_position(floor)),
                    ROOF_DESCENT_SECS,
                    EaseFunction::QuadraticOut,
                )
        }
        FloorCategory::BuildingFloor => {
            let eye_y = layout.floor_eye_height(floor);
            script
                .then_move(
                    AxisTargets::all(Vec3::new(
                        0.0,
                        eye_y + APPROACH_LIFT,
                        layout.facade_z() + FACADE_STANDOFF,
                    )),
                    APPROACH_SECS,
                    EaseFunction::QuadraticInOut,
                )
                .then_move(
                    AxisTargets::all(layout.interior_rest_position(floor)),
                    PUSH_THROUGH_SECS,
                    EaseFunction::CubicOut,
                )
        }
    };

    script
        .fov_at(0.0, ENTRY_FOV_PEAK, ENTRY_FOV_PEAK_SECS, EaseFunction::QuadraticIn)
        .fov_at(
            ENTRY_FOV_PEAK_SECS,
            CAMERA_FOV_DEGREES,
            ENTRY_FOV_RESTORE_SECS,
            EaseFunction::QuadraticOut,
        )
}

/// Elevator ride between two rooms. `current` is the live camera position.
///
/// Crossing between the rooftop and the building backs off the facade first
/// so the camera never clips through the roof slab.
pub fn floor_transition_script(
    layout: &TowerLayout,
    from: FloorIndex,
    to: FloorIndex,
    current: Vec3,
) -> CameraScript {
    let target = layout.interior_rest_position(to);
    let script = CameraScript::new(ScriptKind::FloorTransition);

    if layout.category(from) != layout.category(to) {
        script
            .then_move(
                AxisTargets::z(current.z + ELEVATOR_RETREAT),
                ELEVATOR_RETREAT_SECS,
                EaseFunction::QuadraticIn,
            )
            .then_move(
                AxisTargets::y(target.y),
                ELEVATOR_TRAVEL_SECS,
                EaseFunction::QuadraticInOut,
            )
            .then_move(
                AxisTargets::z(target.z),
                ELEVATOR_ADVANCE_SECS,
                EaseFunction::QuadraticOut,
            )
    } else {
        script.then_move(
            AxisTargets::yz(target.y, target.z),
            ELEVATOR_SLIDE_SECS,
            EaseFunction::QuadraticInOut,
        )
    }
}

/// Pull back out to the literal position the camera had before entering.
pub fn room_exit_script(pre_entry_position: Vec3, restore_fov: f32) -> CameraScript {
    CameraScript::new(ScriptKind::RoomExit)
        .then_move(
            AxisTargets::all(pre_entry_position),
            EXIT_PULLBACK_SECS,
            EaseFunction::QuadraticInOut,
        )
        .fov_at(0.0, EXIT_FOV_COMPRESS, EXIT_FOV_COMPRESS_SECS, EaseFunction::QuadraticIn)
        .fov_at(
            EXIT_FOV_COMPRESS_SECS,
            restore_fov,
            EXIT_FOV_RESTORE_SECS,
            EaseFunction::QuadraticOut,
        )
}
