//! Room visits: picking a floor, the scripted camera moves in and out of it,
//! and the elevator between rooms.

/// Timeline of position phases and fov tweens played on the camera pose.
pub mod camera_script;

/// Rejection reasons for navigation requests.
pub mod error;

/// Requests into and notifications out of the room state machine.
pub mod events;

/// EXPLORING / APPROACHING / INSIDE / EXITING state machine.
pub mod room_manager;

/// ECS systems wiring input, scripts and notifications to the state machine.
pub mod systems;

/// Entry, elevator and exit choreography.
pub mod transitions;
