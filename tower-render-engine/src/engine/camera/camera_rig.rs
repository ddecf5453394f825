use super::camera_pose::CameraPose;
use super::spiral_path::{SpiralPath, clamp_progress};
use crate::engine::input::input_aggregator::InputAggregator;
use bevy::prelude::*;
use constants::camera::{CAMERA_FOV_DEGREES, FOLLOW_LOOK_AT_EASE, FOLLOW_PROGRESS_EASE};

/// Snapshot taken when a room is entered and restored when it is left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedCameraState {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
    pub progress: f32,
}

/// Path follower that owns the camera pose while the visitor explores.
///
/// Progress is eased toward the scroll progress first, then the look-at point
/// is eased separately toward the path target for that eased progress. Shake
/// is added to the position only.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    eased_progress: f32,
    current_look_at: Vec3,
    shake_offset: Vec3,
    fov_degrees: f32,
    active: bool,
    pub progress_ease: f32,
    pub look_at_ease: f32,
}

impl CameraRig {
    pub fn new(path: &SpiralPath, start_progress: f32) -> Self {
        let progress = clamp_progress(start_progress);
        Self {
            eased_progress: progress,
            current_look_at: path.look_at_at(progress),
            shake_offset: Vec3::ZERO,
            fov_degrees: CAMERA_FOV_DEGREES,
            active: true,
            progress_ease: FOLLOW_PROGRESS_EASE,
            look_at_ease: FOLLOW_LOOK_AT_EASE,
        }
    }

    /// Advance one tick toward `input_progress`. Returns `None` while frozen.
    pub fn update(&mut self, input_progress: f32, path: &SpiralPath) -> Option<CameraPose> {
        if !self.active {
            return None;
        }

        let target = clamp_progress(input_progress);
        self.eased_progress =
            clamp_progress(self.eased_progress + (target - self.eased_progress) * self.progress_ease);

        let look_target = path.look_at_at(self.eased_progress);
        self.current_look_at = self.current_look_at.lerp(look_target, self.look_at_ease);

        Some(self.pose(path))
    }

    /// Pose for the current eased state, without advancing it.
    pub fn pose(&self, path: &SpiralPath) -> CameraPose {
        CameraPose::new(
            path.position_at(self.eased_progress) + self.shake_offset,
            self.current_look_at,
            self.fov_degrees,
        )
    }

    pub fn set_shake(&mut self, offset: Vec3) {
        self.shake_offset = offset;
    }

    pub fn disable(&mut self) {
        self.active = false;
    }

    pub fn enable(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn eased_progress(&self) -> f32 {
        self.eased_progress
    }

    pub fn look_at(&self) -> Vec3 {
        self.current_look_at
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Capture the follower state plus the live camera position.
    pub fn save_state(&self, live_pose: &CameraPose) -> SavedCameraState {
        SavedCameraState {
            position: live_pose.position,
            look_at: self.current_look_at,
            fov_degrees: self.fov_degrees,
            progress: self.eased_progress,
        }
    }

    pub fn restore_state(&mut self, state: &SavedCameraState) {
        self.eased_progress = state.progress;
        self.current_look_at = state.look_at;
        self.fov_degrees = state.fov_degrees;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&SpiralPath::default(), 1.0)
    }
}

/// Feed the displayed scroll progress into the rig and publish its pose.
pub fn drive_camera_rig(
    input: Res<InputAggregator>,
    path: Res<SpiralPath>,
    mut rig: ResMut<CameraRig>,
    mut pose: ResMut<CameraPose>,
) {
    if let Some(next) = rig.update(input.displayed_progress(), &path) {
        *pose = next;
    }
}

pub fn rig_is_active(rig: Res<CameraRig>) -> bool {
    rig.is_active()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(rig: &mut CameraRig, path: &SpiralPath, progress: f32, ticks: usize) {
        for _ in 0..ticks {
            rig.update(progress, path);
        }
    }

    #[test]
    fn eases_a_fixed_fraction_per_tick() {
        let path = SpiralPath::default();
        let mut rig = CameraRig::new(&path, 1.0);

        rig.update(0.0, &path);
        assert!((rig.eased_progress() - (1.0 - FOLLOW_PROGRESS_EASE)).abs() < 1e-6);
    }

    #[test]
    fn converges_onto_path() {
        let path = SpiralPath::default();
        let mut rig = CameraRig::new(&path, 1.0);
        settle(&mut rig, &path, 0.5, 600);

        let pose = rig.pose(&path);
        assert!((rig.eased_progress() - 0.5).abs() < 1e-4);
        assert!(pose.position.distance(path.position_at(0.5)) < 1e-2);
        assert!(pose.look_at.distance(path.look_at_at(0.5)) < 1e-2);
    }

    #[test]
    fn look_at_lags_behind_progress() {
        let path = SpiralPath::default();
        let mut rig = CameraRig::new(&path, 1.0);
        let pose = rig.update(0.0, &path).unwrap();

        // The look-at only moved a fraction of the way toward the new height.
        let target = path.look_at_at(rig.eased_progress());
        assert!(pose.look_at.y > target.y);
    }

    #[test]
    fn shake_moves_position_but_not_look_at() {
        let path = SpiralPath::default();
        let mut calm = CameraRig::new(&path, 0.5);
        let mut shaken = calm.clone();
        shaken.set_shake(Vec3::new(0.01, -0.02, 0.005));

        let a = calm.update(0.5, &path).unwrap();
        let b = shaken.update(0.5, &path).unwrap();
        assert_eq!(a.look_at, b.look_at);
        assert!((b.position - a.position - Vec3::new(0.01, -0.02, 0.005)).length() < 1e-5);
    }

    #[test]
    fn disabled_rig_is_frozen() {
        let path = SpiralPath::default();
        let mut rig = CameraRig::new(&path, 1.0);
        rig.disable();

        assert!(rig.update(0.0, &path).is_none());
        assert_eq!(rig.eased_progress(), 1.0);
    }

    #[test]
    fn enable_and_disable_are_idempotent() {
        let mut rig = CameraRig::default();
        rig.disable();
        rig.disable();
        assert!(!rig.is_active());
        rig.enable();
        rig.enable();
        assert!(rig.is_active());
    }

    #[test]
    fn save_then_restore_is_bit_identical() {
        let path = SpiralPath::default();
        let mut rig = CameraRig::new(&path, 1.0);
        settle(&mut rig, &path, 0.3, 17);
        let live = rig.pose(&path);

        let saved = rig.save_state(&live);
        rig.restore_state(&saved);

        assert_eq!(rig.eased_progress().to_bits(), saved.progress.to_bits());
        assert_eq!(rig.look_at(), saved.look_at);
        assert_eq!(rig.fov_degrees().to_bits(), saved.fov_degrees.to_bits());
        assert_eq!(saved.position, live.position);
    }

    #[test]
    fn restore_resumes_where_exploration_left_off() {
        let path = SpiralPath::default();
        let mut rig = CameraRig::new(&path, 1.0);
        settle(&mut rig, &path, 0.4, 30);
        let saved = rig.save_state(&rig.pose(&path));
        let expected = rig.clone().update(0.4, &path).unwrap();

        // Wander off, then come back.
        settle(&mut rig, &path, 0.0, 50);
        rig.restore_state(&saved);

        assert_eq!(rig.update(0.4, &path).unwrap(), expected);
    }
}
