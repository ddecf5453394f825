//! Exploration camera: the helical path, the smoothed follower that rides it,
//! the handheld shake layered on top, and the pose that reaches the bevy camera.

/// Live camera pose resource and the system that applies it.
pub mod camera_pose;

/// Path follower with double smoothing and save/restore for room visits.
pub mod camera_rig;

/// Handheld shake offset with delayed resume.
pub mod camera_shake;

/// Pure progress to position/look-at mapping.
pub mod spiral_path;
