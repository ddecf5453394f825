/// Accumulated wheel delta (pixels) needed for one floor step.
pub const WHEEL_THRESHOLD: f32 = 50.0;

/// Accumulated vertical swipe distance (pixels) needed for one floor step.
pub const TOUCH_THRESHOLD: f32 = 50.0;

/// Accumulated vertical mouse-drag distance (pixels) needed for one floor step.
pub const DRAG_THRESHOLD: f32 = 40.0;

/// Lockout after a floor step, shared by every input channel.
pub const STEP_COOLDOWN_SECS: f32 = 0.4;

/// Fraction of the remaining gap the displayed progress closes per tick.
pub const PROGRESS_SMOOTHING: f32 = 0.055;

/// Below this gap the displayed progress snaps onto its target.
pub const PROGRESS_SNAP_EPSILON: f32 = 0.001;

/// Pixels per line when the wheel reports line units.
pub const WHEEL_LINE_TO_PIXELS: f32 = 20.0;

/// A touch that travels further than this is a swipe, not a tap.
pub const TAP_MAX_TRAVEL_PX: f32 = 10.0;

/// A touch held longer than this is not a tap.
pub const TAP_MAX_DURATION_SECS: f32 = 0.3;

/// A mouse press that travels further than this is a drag, not a click.
pub const CLICK_MAX_TRAVEL_PX: f32 = 5.0;

/// Minimum interval between progress notifications to the page.
pub const PROGRESS_NOTIFY_INTERVAL_SECS: f32 = 0.1;
