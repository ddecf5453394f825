use constants::navigation::{DRAG_THRESHOLD, TOUCH_THRESHOLD, WHEEL_THRESHOLD};

/// Device family feeding a channel. Adding a device means adding a variant and
/// a threshold here, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannelKind {
    Wheel,
    Touch,
    Drag,
}

impl InputChannelKind {
    pub const ALL: [InputChannelKind; 3] = [Self::Wheel, Self::Touch, Self::Drag];

    pub fn default_threshold(self) -> f32 {
        match self {
            Self::Wheel => WHEEL_THRESHOLD,
            Self::Touch => TOUCH_THRESHOLD,
            Self::Drag => DRAG_THRESHOLD,
        }
    }
}

/// One discrete move between adjacent floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorStep {
    /// One floor up, toward the rooftop.
    Advance,
    /// One floor down, toward the ground.
    Retreat,
}

impl FloorStep {
    pub fn offset(self) -> isize {
        match self {
            Self::Advance => 1,
            Self::Retreat => -1,
        }
    }
}

/// Running accumulator for a single device.
///
/// Deltas follow browser scroll conventions: positive means the content moves
/// up (wheel pulled toward the user, finger or mouse dragged upward), which
/// walks the camera down the tower.
#[derive(Debug, Clone, PartialEq)]
pub struct InputChannel {
    pub kind: InputChannelKind,
    pub threshold: f32,
    accumulated: f32,
}

impl InputChannel {
    pub fn new(kind: InputChannelKind, threshold: f32) -> Self {
        Self {
            kind,
            threshold,
            accumulated: 0.0,
        }
    }

    /// Add a delta and report a step once the magnitude reaches the threshold.
    /// The accumulator keeps its value; the caller resets after acting on it.
    pub fn accumulate(&mut self, delta: f32) -> Option<FloorStep> {
        if !delta.is_finite() {
            return None;
        }

        self.accumulated += delta;
        if self.accumulated.abs() < self.threshold {
            return None;
        }

        Some(if self.accumulated > 0.0 {
            FloorStep::Retreat
        } else {
            FloorStep::Advance
        })
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }
}

impl From<InputChannelKind> for InputChannel {
    fn from(kind: InputChannelKind) -> Self {
        Self::new(kind, kind.default_threshold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_until_threshold() {
        let mut channel = InputChannel::from(InputChannelKind::Wheel);
        assert_eq!(channel.accumulate(20.0), None);
        assert_eq!(channel.accumulate(20.0), None);
        assert_eq!(channel.accumulate(10.0), Some(FloorStep::Retreat));
        assert_eq!(channel.accumulated(), 50.0);
    }

    #[test]
    fn negative_deltas_advance() {
        let mut channel = InputChannel::from(InputChannelKind::Drag);
        assert_eq!(channel.accumulate(-41.0), Some(FloorStep::Advance));
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        let mut channel = InputChannel::from(InputChannelKind::Touch);
        assert_eq!(channel.accumulate(30.0), None);
        assert_eq!(channel.accumulate(-30.0), None);
        assert_eq!(channel.accumulated(), 0.0);
    }

    #[test]
    fn ignores_non_finite_deltas() {
        let mut channel = InputChannel::from(InputChannelKind::Wheel);
        assert_eq!(channel.accumulate(f32::NAN), None);
        assert_eq!(channel.accumulate(f32::INFINITY), None);
        assert_eq!(channel.accumulated(), 0.0);
    }

    #[test]
    fn thresholds_per_device() {
        assert_eq!(InputChannelKind::Wheel.default_threshold(), 50.0);
        assert_eq!(InputChannelKind::Touch.default_threshold(), 50.0);
        assert_eq!(InputChannelKind::Drag.default_threshold(), 40.0);
    }
}
