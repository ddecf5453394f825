//! Timings are in seconds, field of view values in degrees.

/// Rooftop entry: height above the rooftop eye level before descending.
pub const ROOF_ENTRY_CLEARANCE: f32 = 5.0;
/// Rooftop entry: Z of the hover point above the roof.
pub const ROOF_ENTRY_HOVER_Z: f32 = 8.0;
/// Z of the resting point on the rooftop.
pub const ROOF_REST_Z: f32 = 3.0;
pub const ROOF_HOVER_SECS: f32 = 0.6;
pub const ROOF_DESCENT_SECS: f32 = 0.6;

/// Floor entry: distance in front of the facade for the approach.
pub const FACADE_STANDOFF: f32 = 2.0;
/// Floor entry: lift above the floor eye height during the approach.
pub const APPROACH_LIFT: f32 = 0.5;
/// Lift above the floor eye height at the interior resting point.
pub const INTERIOR_LIFT: f32 = 0.8;
pub const APPROACH_SECS: f32 = 0.8;
pub const PUSH_THROUGH_SECS: f32 = 0.5;

/// Entry field of view pulse.
pub const ENTRY_FOV_PEAK: f32 = 65.0;
pub const ENTRY_FOV_PEAK_SECS: f32 = 0.5;
pub const ENTRY_FOV_RESTORE_SECS: f32 = 0.7;

/// Elevator: retreat distance when switching between rooftop and building.
pub const ELEVATOR_RETREAT: f32 = 2.0;
pub const ELEVATOR_RETREAT_SECS: f32 = 0.25;
pub const ELEVATOR_TRAVEL_SECS: f32 = 0.5;
pub const ELEVATOR_ADVANCE_SECS: f32 = 0.25;
pub const ELEVATOR_SLIDE_SECS: f32 = 0.4;

/// Exit: pull back to the stored pre-entry position.
pub const EXIT_PULLBACK_SECS: f32 = 1.0;
pub const EXIT_FOV_COMPRESS: f32 = 45.0;
pub const EXIT_FOV_COMPRESS_SECS: f32 = 0.3;
pub const EXIT_FOV_RESTORE_SECS: f32 = 0.7;
