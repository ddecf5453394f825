/// Number of regular floors below the rooftop (1F-8F).
pub const BUILDING_FLOORS: usize = 8;

/// Addressable floors including the rooftop (RF).
pub const FLOOR_COUNT: usize = BUILDING_FLOORS + 1;

/// Storey height in world units.
pub const FLOOR_HEIGHT: f32 = 4.0;

/// Building footprint along X.
pub const BUILDING_WIDTH: f32 = 10.0;

/// Building footprint along Z (the facade faces +Z).
pub const BUILDING_DEPTH: f32 = 8.0;

/// Horizontal distance of the orbit from the building axis.
pub const ORBIT_RADIUS: f32 = 18.0;

/// Eye height inside a floor as a fraction of the storey height.
pub const FLOOR_EYE_RATIO: f32 = 0.55;

/// Eye height above the roof slab when standing on the rooftop.
pub const ROOFTOP_EYE_OFFSET: f32 = 1.5;

/// How far above the roof slab the orbit tops out.
pub const ORBIT_TOP_OFFSET: f32 = 2.0;

/// Regular floor hit volume as a fraction of (width, height, depth).
pub const FLOOR_HIT_SCALE: [f32; 3] = [0.9, 0.8, 0.9];

/// Rooftop hit volume footprint as a fraction of (width, depth).
pub const ROOFTOP_HIT_FOOTPRINT: [f32; 2] = [0.8, 0.8];

/// Rooftop hit volume height.
pub const ROOFTOP_HIT_HEIGHT: f32 = 2.0;
