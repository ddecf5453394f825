use super::camera_rig::CameraRig;
use crate::rooms::events::{RoomEntered, RoomExited};
use bevy::prelude::*;
use constants::camera::{SHAKE_INTENSITY, SHAKE_RESUME_DELAY_SECS, SHAKE_SPEED};
use std::time::Duration;

/// Handheld-camera jitter added to the follower position while exploring.
#[derive(Resource, Debug, Clone)]
pub struct CameraShake {
    pub intensity: f32,
    pub speed: f32,
    elapsed: f32,
    enabled: bool,
    resume: Option<Timer>,
}

impl CameraShake {
    pub fn new(intensity: f32, speed: f32) -> Self {
        Self {
            intensity,
            speed,
            elapsed: 0.0,
            enabled: true,
            resume: None,
        }
    }

    /// Jitter at absolute time `t`. Each axis mixes two incommensurate
    /// frequencies so the motion never visibly repeats.
    pub fn offset_at(&self, t: f32) -> Vec3 {
        let (i, s) = (self.intensity, self.speed);
        Vec3::new(
            (t * s * 1.1).sin() * (t * 0.7).cos() * i,
            (t * s * 0.8).sin() * (t * 1.3).cos() * i,
            (t * s * 0.9).sin() * (t * 0.5).cos() * i * 0.5,
        )
    }

    pub fn tick(&mut self, delta: Duration) -> Vec3 {
        self.elapsed += delta.as_secs_f32();

        if let Some(timer) = self.resume.as_mut() {
            timer.tick(delta);
            if timer.finished() {
                self.resume = None;
                self.enabled = true;
            }
        }

        if self.enabled {
            self.offset_at(self.elapsed)
        } else {
            Vec3::ZERO
        }
    }

    /// Stop shaking. Also drops a pending delayed resume, so a resume scheduled
    /// by an earlier exit cannot wake the shake up inside a newer room.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.resume = None;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        self.resume = None;
    }

    pub fn resume_after(&mut self, delay: Duration) {
        self.resume = Some(Timer::new(delay, TimerMode::Once));
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn resume_pending(&self) -> bool {
        self.resume.is_some()
    }
}

impl Default for CameraShake {
    fn default() -> Self {
        Self::new(SHAKE_INTENSITY, SHAKE_SPEED)
    }
}

pub fn update_camera_shake(
    time: Res<Time>,
    mut shake: ResMut<CameraShake>,
    mut rig: ResMut<CameraRig>,
) {
    let offset = shake.tick(time.delta());
    rig.set_shake(offset);
}

/// Pause the shake inside rooms and bring it back shortly after leaving.
pub fn pause_shake_in_rooms(
    mut entered: EventReader<RoomEntered>,
    mut exited: EventReader<RoomExited>,
    mut shake: ResMut<CameraShake>,
) {
    for _ in exited.read() {
        shake.resume_after(Duration::from_secs_f32(SHAKE_RESUME_DELAY_SECS));
    }
    // Entries are applied last so a same-frame exit then entry stays paused.
    for _ in entered.read() {
        shake.disable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn offset_is_bounded_by_intensity() {
        let shake = CameraShake::default();
        for step in 0..1000 {
            let offset = shake.offset_at(step as f32 * 0.037);
            assert!(offset.x.abs() <= SHAKE_INTENSITY);
            assert!(offset.y.abs() <= SHAKE_INTENSITY);
            assert!(offset.z.abs() <= SHAKE_INTENSITY * 0.5);
        }
    }

    #[test]
    fn disabled_shake_is_zero() {
        let mut shake = CameraShake::default();
        shake.disable();
        for _ in 0..10 {
            assert_eq!(shake.tick(FRAME), Vec3::ZERO);
        }
    }

    #[test]
    fn resumes_after_delay() {
        let mut shake = CameraShake::default();
        shake.disable();
        shake.resume_after(Duration::from_millis(800));

        shake.tick(Duration::from_millis(500));
        assert!(!shake.is_enabled());
        shake.tick(Duration::from_millis(400));
        assert!(shake.is_enabled());
        assert!(!shake.resume_pending());
    }

    #[test]
    fn disable_cancels_pending_resume() {
        let mut shake = CameraShake::default();
        shake.disable();
        shake.resume_after(Duration::from_millis(800));
        shake.tick(Duration::from_millis(300));

        // Re-entered a room before the resume fired.
        shake.disable();
        shake.tick(Duration::from_secs(2));
        assert!(!shake.is_enabled());
    }
}
