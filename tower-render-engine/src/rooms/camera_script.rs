use crate::engine::camera::camera_pose::CameraPose;
use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;

/// Which choreography a script plays. Reported back on completion so the
/// room state machine knows which transition just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    RoomEntry,
    FloorTransition,
    RoomExit,
}

/// Absolute per-axis targets. Axes left as `None` are not touched by a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisTargets {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl AxisTargets {
    pub fn all(target: Vec3) -> Self {
        Self {
            x: Some(target.x),
            y: Some(target.y),
            z: Some(target.z),
        }
    }

    pub fn y(y: f32) -> Self {
        Self {
            y: Some(y),
            ..default()
        }
    }

    pub fn z(z: f32) -> Self {
        Self {
            z: Some(z),
            ..default()
        }
    }

    pub fn yz(y: f32, z: f32) -> Self {
        Self {
            y: Some(y),
            z: Some(z),
            ..default()
        }
    }

    /// `from` with the named axes moved a fraction `s` toward their targets.
    fn blend(&self, from: Vec3, s: f32) -> Vec3 {
        let lerp = |a: f32, b: Option<f32>| b.map_or(a, |b| a + (b - a) * s);
        Vec3::new(lerp(from.x, self.x), lerp(from.y, self.y), lerp(from.z, self.z))
    }

    /// `from` with the named axes replaced by their exact targets.
    fn settle(&self, from: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(from.x),
            self.y.unwrap_or(from.y),
            self.z.unwrap_or(from.z),
        )
    }
}

#[derive(Debug, Clone)]
struct PositionPhase {
    targets: AxisTargets,
    duration: f32,
    ease: EaseFunction,
    from: Option<Vec3>,
}

#[derive(Debug, Clone)]
struct FovTween {
    start: f32,
    duration: f32,
    to: f32,
    ease: EaseFunction,
    from: Option<f32>,
}

fn phase_fraction(elapsed: f32, start: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        ((elapsed - start) / duration).clamp(0.0, 1.0)
    }
}

/// Time-driven camera move: sequential position phases plus field-of-view
/// tweens at absolute offsets.
///
/// Each phase starts from wherever the camera is when it begins. The look-at
/// point keeps its offset from the camera for the whole script, so the view
/// direction does not change while the camera travels.
#[derive(Debug, Clone)]
pub struct CameraScript {
    pub kind: ScriptKind,
    phases: Vec<PositionPhase>,
    fov_tweens: Vec<FovTween>,
    elapsed: f32,
    look_offset: Option<Vec3>,
}

impl CameraScript {
    pub fn new(kind: ScriptKind) -> Self {
        Self {
            kind,
            phases: Vec::new(),
            fov_tweens: Vec::new(),
            elapsed: 0.0,
            look_offset: None,
        }
    }

    /// Append a position phase after the previous one.
    pub fn then_move(mut self, targets: AxisTargets, duration: f32, ease: EaseFunction) -> Self {
        self.phases.push(PositionPhase {
            targets,
            duration,
            ease,
            from: None,
        });
        self
    }

    /// Tween the field of view starting `start` seconds into the script.
    pub fn fov_at(mut self, start: f32, to: f32, duration: f32, ease: EaseFunction) -> Self {
        self.fov_tweens.push(FovTween {
            start,
            duration,
            to,
            ease,
            from: None,
        });
        self.fov_tweens.sort_by(|a, b| a.start.total_cmp(&b.start));
        self
    }

    pub fn duration(&self) -> f32 {
        let moves: f32 = self.phases.iter().map(|phase| phase.duration).sum();
        self.fov_tweens
            .iter()
            .map(|tween| tween.start + tween.duration)
            .fold(moves, f32::max)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Step the script by `dt` seconds and write the result into `pose`.
    /// Returns `true` once every phase and tween has completed.
    pub fn advance(&mut self, dt: f32, pose: &mut CameraPose) -> bool {
        let look_offset = *self.look_offset.get_or_insert(pose.look_offset());
        self.elapsed += dt.max(0.0);

        let mut start = 0.0;
        for phase in &mut self.phases {
            if self.elapsed < start {
                break;
            }
            let from = *phase.from.get_or_insert(pose.position);
            let t = phase_fraction(self.elapsed, start, phase.duration);

            pose.position = if t >= 1.0 {
                phase.targets.settle(from)
            } else {
                phase.targets.blend(from, phase.ease.sample_clamped(t))
            };
            start += phase.duration;
        }

        for tween in &mut self.fov_tweens {
            if self.elapsed < tween.start {
                break;
            }
            let from = *tween.from.get_or_insert(pose.fov_degrees);
            let t = phase_fraction(self.elapsed, tween.start, tween.duration);

            pose.fov_degrees = if t >= 1.0 {
                tween.to
            } else {
                from + (tween.to - from) * tween.ease.sample_clamped(t)
            };
        }

        pose.look_at = pose.position + look_offset;
        self.is_finished()
    }
}
