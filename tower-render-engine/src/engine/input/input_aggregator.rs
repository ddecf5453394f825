use super::input_channel::{FloorStep, InputChannel, InputChannelKind};
use crate::engine::assets::tower_layout::FloorIndex;
use crate::engine::camera::spiral_path::clamp_progress;
use bevy::prelude::*;
use constants::navigation::{PROGRESS_SMOOTHING, PROGRESS_SNAP_EPSILON, STEP_COOLDOWN_SECS};
use std::time::Duration;

/// Turns device deltas into floor steps and eases the displayed progress
/// toward the target floor.
///
/// One shared cooldown follows every step. Deltas that arrive during the
/// cooldown are dropped rather than accumulated, so a long flick moves exactly
/// one floor.
#[derive(Resource, Debug, Clone)]
pub struct InputAggregator {
    floor_count: usize,
    target_floor: FloorIndex,
    current_floor: FloorIndex,
    displayed_progress: f32,
    pub smoothing: f32,
    channels: Vec<InputChannel>,
    cooldown: Option<Timer>,
    cooldown_duration: Duration,
    enabled: bool,
}

impl InputAggregator {
    /// Start parked on the rooftop.
    pub fn new(floor_count: usize) -> Self {
        let floor_count = floor_count.max(1);
        let top = floor_count - 1;
        Self {
            floor_count,
            target_floor: top,
            current_floor: top,
            displayed_progress: 1.0,
            smoothing: PROGRESS_SMOOTHING,
            channels: InputChannelKind::ALL.into_iter().map(InputChannel::from).collect(),
            cooldown: None,
            cooldown_duration: Duration::from_secs_f32(STEP_COOLDOWN_SECS),
            enabled: true,
        }
    }

    /// Feed one raw delta. Returns the step it triggered, if any.
    pub fn push_delta(&mut self, kind: InputChannelKind, delta: f32) -> Option<FloorStep> {
        if !self.enabled {
            return None;
        }
        if self.in_cooldown() {
            debug!("Dropped {:?} delta {:.1} during step cooldown", kind, delta);
            return None;
        }

        let step = self.channel_mut(kind)?.accumulate(delta)?;
        self.step(step);
        self.reset_channels();
        self.cooldown = Some(Timer::new(self.cooldown_duration, TimerMode::Once));
        Some(step)
    }

    pub fn step(&mut self, step: FloorStep) {
        self.go_to_floor(self.target_floor as isize + step.offset());
    }

    /// Retarget a floor. Out-of-range requests clamp onto the nearest floor.
    pub fn go_to_floor(&mut self, floor: isize) {
        self.target_floor = floor.clamp(0, self.top_floor() as isize) as FloorIndex;
    }

    /// External jump, e.g. a navigation link. Floors and displayed progress
    /// snap together; the camera follower does the gliding.
    pub fn set_progress_directly(&mut self, progress: f32) {
        let progress = clamp_progress(progress);
        let floor = (progress * self.top_floor() as f32).round() as FloorIndex;
        self.target_floor = floor.min(self.top_floor());
        self.current_floor = self.target_floor;
        self.displayed_progress = progress;
    }

    /// Advance timers and ease the displayed progress one tick.
    pub fn tick(&mut self, delta: Duration) -> f32 {
        if let Some(timer) = self.cooldown.as_mut() {
            timer.tick(delta);
            if timer.finished() {
                self.cooldown = None;
            }
        }

        let target = self.target_progress();
        let gap = target - self.displayed_progress;
        self.displayed_progress = clamp_progress(self.displayed_progress + gap * self.smoothing);

        if gap.abs() < PROGRESS_SNAP_EPSILON {
            self.displayed_progress = target;
            self.current_floor = self.target_floor;
        }

        self.displayed_progress
    }

    /// Forget partial gestures on one device, e.g. when a touch begins or ends.
    pub fn reset_channel(&mut self, kind: InputChannelKind) {
        if let Some(channel) = self.channel_mut(kind) {
            channel.reset();
        }
    }

    pub fn reset_channels(&mut self) {
        self.channels.iter_mut().for_each(InputChannel::reset);
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.reset_channels();
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn in_cooldown(&self) -> bool {
        self.cooldown.is_some()
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    pub fn top_floor(&self) -> FloorIndex {
        self.floor_count - 1
    }

    pub fn target_floor(&self) -> FloorIndex {
        self.target_floor
    }

    /// Floor the displayed progress last settled on.
    pub fn current_floor(&self) -> FloorIndex {
        self.current_floor
    }

    pub fn target_progress(&self) -> f32 {
        if self.floor_count <= 1 {
            return 0.0;
        }
        self.target_floor as f32 / self.top_floor() as f32
    }

    pub fn displayed_progress(&self) -> f32 {
        self.displayed_progress
    }

    /// Remaining distance to the target, a rough measure of scroll speed.
    pub fn velocity(&self) -> f32 {
        (self.target_progress() - self.displayed_progress).abs()
    }

    pub fn channel(&self, kind: InputChannelKind) -> Option<&InputChannel> {
        self.channels.iter().find(|channel| channel.kind == kind)
    }

    fn channel_mut(&mut self, kind: InputChannelKind) -> Option<&mut InputChannel> {
        self.channels.iter_mut().find(|channel| channel.kind == kind)
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(constants::tower::FLOOR_COUNT)
    }
}

pub fn tick_input_aggregator(time: Res<Time>, mut aggregator: ResMut<InputAggregator>) {
    aggregator.tick(time.delta());
}
