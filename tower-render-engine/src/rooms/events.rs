use super::camera_script::ScriptKind;
use crate::engine::assets::tower_layout::FloorIndex;
use bevy::prelude::*;

/// Pick ray from a tap or click, in world space.
#[derive(Event, Debug, Clone, Copy)]
pub struct PickRequest {
    pub ray: Ray3d,
}

/// Jump the exploration camera to a floor (navigation link). Clamped.
#[derive(Event, Debug, Clone, Copy)]
pub struct GoToFloorRequest {
    pub floor: isize,
}

/// Elevator request while a room is open. Clamped.
#[derive(Event, Debug, Clone, Copy)]
pub struct FloorChangeRequest {
    pub floor: isize,
}

/// Back button or Escape.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ExitRoomRequest;

/// A scripted camera move ran to completion.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraScriptFinished {
    pub kind: ScriptKind,
}

/// The entry move finished and the room content should appear.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomEntered {
    pub floor: FloorIndex,
}

/// Leaving the room started; content should hide.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomExited;

/// An elevator ride arrived.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveFloorChanged {
    pub floor: FloorIndex,
}

/// Pointer started or stopped hovering a floor volume while exploring.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChanged {
    pub floor: Option<FloorIndex>,
}
