use bevy::prelude::*;
use constants::camera::CAMERA_FOV_DEGREES;

/// Marker for the single camera the navigation core drives.
#[derive(Component, Debug, Default)]
pub struct TowerCamera;

/// Live camera pose. Exactly one driver writes it per tick: the camera rig
/// while exploring, or the active scripted transition while a room move runs.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            look_at,
            fov_degrees,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.look_at, Vec3::Y)
    }

    /// Vector from the camera to its look-at point.
    pub fn look_offset(&self) -> Vec3 {
        self.look_at - self.position
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(15.0, 8.0, 15.0), Vec3::new(0.0, 8.0, 0.0), CAMERA_FOV_DEGREES)
    }
}

/// Copy the pose onto the tower camera's transform and perspective projection.
pub fn apply_camera_pose(
    pose: Res<CameraPose>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<TowerCamera>>,
) {
    if !pose.is_changed() {
        return;
    }

    for (mut transform, mut projection) in &mut cameras {
        *transform = pose.transform();
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = pose.fov_degrees.to_radians();
        }
    }
}
