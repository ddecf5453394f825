/// Default vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 500.0;

/// Fraction of the remaining progress gap the follower closes per tick.
pub const FOLLOW_PROGRESS_EASE: f32 = 0.06;

/// Fraction of the remaining look-at gap the follower closes per tick.
pub const FOLLOW_LOOK_AT_EASE: f32 = 0.055;

/// Full orbit revolutions per floor step.
pub const TURNS_PER_FLOOR: f32 = 1.0;

/// Amplitude of the handheld shake in world units.
pub const SHAKE_INTENSITY: f32 = 0.015;

/// Base frequency multiplier of the handheld shake.
pub const SHAKE_SPEED: f32 = 1.2;

/// Delay before the shake resumes after leaving a room, in seconds.
pub const SHAKE_RESUME_DELAY_SECS: f32 = 0.8;
