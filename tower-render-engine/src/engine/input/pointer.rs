use super::input_aggregator::InputAggregator;
use super::input_channel::InputChannelKind;
use bevy::input::ButtonState;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::WindowEvent;
use constants::navigation::{
    CLICK_MAX_TRAVEL_PX, TAP_MAX_DURATION_SECS, TAP_MAX_TRAVEL_PX, WHEEL_LINE_TO_PIXELS,
};

/// A press-release short and still enough to count as a pick rather than a
/// scroll gesture. Position is in window logical pixels.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerTap {
    pub position: Vec2,
}

/// Tracks one press from start to release so a swipe is never read as a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapDetector {
    start: Vec2,
    last: Vec2,
    max_travel: f32,
    started_at: f32,
}

impl TapDetector {
    pub fn begin(position: Vec2, now: f32) -> Self {
        Self {
            start: position,
            last: position,
            max_travel: 0.0,
            started_at: now,
        }
    }

    /// Record a move and return the upward screen delta since the last one.
    pub fn track(&mut self, position: Vec2) -> f32 {
        let delta = self.last.y - position.y;
        self.last = position;
        self.max_travel = self.max_travel.max(self.start.distance(position));
        delta
    }

    pub fn last(&self) -> Vec2 {
        self.last
    }

    pub fn travel(&self) -> f32 {
        self.max_travel
    }

    pub fn is_tap(&self, now: f32, max_travel: f32, max_duration: Option<f32>) -> bool {
        self.max_travel < max_travel
            && max_duration.is_none_or(|limit| now - self.started_at < limit)
    }
}

/// Pointer bookkeeping shared by the wheel, touch and mouse readers.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    pub cursor: Option<Vec2>,
    drag: Option<TapDetector>,
    touch: Option<(u64, TapDetector)>,
}

impl PointerTracker {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn cursor_moved(&mut self, position: Vec2, aggregator: &mut InputAggregator) {
        self.cursor = Some(position);
        if let Some(drag) = self.drag.as_mut() {
            let delta = drag.track(position);
            aggregator.push_delta(InputChannelKind::Drag, delta);
        }
    }

    /// Left-button press or release. A release that barely moved is a click.
    pub fn left_button(
        &mut self,
        state: ButtonState,
        now: f32,
        aggregator: &mut InputAggregator,
    ) -> Option<PointerTap> {
        match state {
            ButtonState::Pressed => {
                let cursor = self.cursor?;
                self.drag = Some(TapDetector::begin(cursor, now));
                aggregator.reset_channel(InputChannelKind::Drag);
                None
            }
            ButtonState::Released => {
                let drag = self.drag.take()?;
                aggregator.reset_channel(InputChannelKind::Drag);
                if drag.is_tap(now, CLICK_MAX_TRAVEL_PX, None) {
                    Some(PointerTap {
                        position: drag.last(),
                    })
                } else {
                    debug!("Mouse travelled {:.1}px, treating as drag", drag.travel());
                    None
                }
            }
        }
    }

    pub fn cursor_left(&mut self, aggregator: &mut InputAggregator) {
        self.cursor = None;
        if self.drag.take().is_some() {
            aggregator.reset_channel(InputChannelKind::Drag);
        }
    }
}

fn wheel_delta_pixels(event: &MouseWheel) -> f32 {
    // Browser deltaY grows when the wheel is pulled toward the user, which
    // bevy reports as negative y.
    match event.unit {
        MouseScrollUnit::Line => -event.y * WHEEL_LINE_TO_PIXELS,
        MouseScrollUnit::Pixel => -event.y,
    }
}

pub fn read_wheel_input(
    mut wheel: EventReader<MouseWheel>,
    mut aggregator: ResMut<InputAggregator>,
) {
    for event in wheel.read() {
        aggregator.push_delta(InputChannelKind::Wheel, wheel_delta_pixels(event));
    }
}

/// Single-finger swipes scroll the tower; short still touches become taps.
pub fn read_touch_input(
    time: Res<Time>,
    mut touches: EventReader<TouchInput>,
    mut tracker: ResMut<PointerTracker>,
    mut aggregator: ResMut<InputAggregator>,
    mut taps: EventWriter<PointerTap>,
) {
    let now = time.elapsed_secs();

    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => {
                if tracker.touch.is_none() {
                    tracker.touch = Some((touch.id, TapDetector::begin(touch.position, now)));
                    aggregator.reset_channel(InputChannelKind::Touch);
                }
            }
            TouchPhase::Moved => {
                let Some((id, detector)) = tracker.touch.as_mut() else {
                    continue;
                };
                if *id != touch.id {
                    continue;
                }
                let delta = detector.track(touch.position);
                aggregator.push_delta(InputChannelKind::Touch, delta);
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                let Some((id, detector)) = tracker.touch else {
                    continue;
                };
                if id != touch.id {
                    continue;
                }
                tracker.touch = None;
                aggregator.reset_channel(InputChannelKind::Touch);

                if touch.phase == TouchPhase::Ended
                    && detector.is_tap(now, TAP_MAX_TRAVEL_PX, Some(TAP_MAX_DURATION_SECS))
                {
                    taps.write(PointerTap {
                        position: touch.position,
                    });
                } else {
                    debug!(
                        "Touch travelled {:.1}px, treating as swipe",
                        detector.travel()
                    );
                }
            }
        }
    }
}

/// Left-button drags scroll the tower; a release close to the press point is
/// a click. Reads the window event stream so moves and button changes that
/// land in the same frame keep their arrival order.
pub fn read_mouse_input(
    time: Res<Time>,
    mut window_events: EventReader<WindowEvent>,
    mut tracker: ResMut<PointerTracker>,
    mut aggregator: ResMut<InputAggregator>,
    mut taps: EventWriter<PointerTap>,
) {
    let now = time.elapsed_secs();

    for event in window_events.read() {
        match event {
            WindowEvent::CursorMoved(moved) => {
                tracker.cursor_moved(moved.position, &mut aggregator);
            }
            WindowEvent::MouseButtonInput(button) if button.button == MouseButton::Left => {
                if let Some(tap) = tracker.left_button(button.state, now, &mut aggregator) {
                    taps.write(tap);
                }
            }
            WindowEvent::CursorLeft(_) => tracker.cursor_left(&mut aggregator),
            _ => {}
        }
    }
}
