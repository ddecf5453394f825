use crate::engine::assets::tower_layout::{FloorIndex, TowerLayout};
use bevy::prelude::*;
use constants::camera::TURNS_PER_FLOOR;
use constants::tower::ORBIT_TOP_OFFSET;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Clamp a progress value onto `[0, 1]`. NaN collapses to the ground floor.
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Helical camera path around the tower.
///
/// Height is linear in progress between first-floor eye level and the roof
/// line. The angle sweeps one full revolution per floor step, ending at the
/// base angle (+Z, facing the front facade) at the rooftop, so every floor
/// rest point looks straight at the front of the building.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpiralPath {
    pub min_y: f32,
    pub max_y: f32,
    pub radius: f32,
    pub total_turns: f32,
    pub base_angle: f32,
    floor_count: usize,
}

impl SpiralPath {
    pub fn new(layout: &TowerLayout) -> Self {
        let floor_count = layout.floor_count().max(1);
        Self {
            min_y: layout.floor_height * 0.5,
            max_y: layout.roof_height() + ORBIT_TOP_OFFSET,
            radius: layout.orbit_radius,
            total_turns: (floor_count - 1) as f32 * TURNS_PER_FLOOR,
            base_angle: FRAC_PI_2,
            floor_count,
        }
    }

    pub fn height_at(&self, progress: f32) -> f32 {
        self.min_y + clamp_progress(progress) * (self.max_y - self.min_y)
    }

    pub fn angle_at(&self, progress: f32) -> f32 {
        self.base_angle + (1.0 - clamp_progress(progress)) * self.total_turns * TAU
    }

    pub fn position_at(&self, progress: f32) -> Vec3 {
        let angle = self.angle_at(progress);
        Vec3::new(
            angle.cos() * self.radius,
            self.height_at(progress),
            angle.sin() * self.radius,
        )
    }

    /// The building axis at camera height, so the camera pans in a pure orbit.
    pub fn look_at_at(&self, progress: f32) -> Vec3 {
        Vec3::new(0.0, self.height_at(progress), 0.0)
    }

    /// Nearest floor for a progress value, used for UI highlighting.
    pub fn floor_at_progress(&self, progress: f32) -> FloorIndex {
        (clamp_progress(progress) * (self.floor_count - 1) as f32).round() as FloorIndex
    }
}

impl Default for SpiralPath {
    fn default() -> Self {
        Self::new(&TowerLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn horizontal_distance(v: Vec3) -> f32 {
        Vec2::new(v.x, v.z).length()
    }

    #[test]
    fn positions_stay_on_orbit_radius() {
        let path = SpiralPath::default();
        for step in 0..=200 {
            let p = step as f32 / 200.0;
            let position = path.position_at(p);
            assert!(
                (horizontal_distance(position) - path.radius).abs() < EPS,
                "progress {p} left the orbit: {position}"
            );
        }
    }

    #[test]
    fn look_at_is_on_axis_at_camera_height() {
        let path = SpiralPath::default();
        for step in 0..=200 {
            let p = step as f32 / 200.0;
            let position = path.position_at(p);
            let target = path.look_at_at(p);
            assert_eq!(target.x, 0.0);
            assert_eq!(target.z, 0.0);
            assert_eq!(target.y, position.y);
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let path = SpiralPath::default();
        assert_eq!(path.position_at(-0.5), path.position_at(0.0));
        assert_eq!(path.position_at(3.0), path.position_at(1.0));
        assert_eq!(path.look_at_at(f32::NAN), path.look_at_at(0.0));
    }

    #[test]
    fn height_spans_first_floor_to_roof() {
        let layout = TowerLayout::default();
        let path = SpiralPath::new(&layout);
        assert_eq!(path.height_at(0.0), layout.floor_height * 0.5);
        assert_eq!(path.height_at(1.0), layout.roof_height() + ORBIT_TOP_OFFSET);
    }

    #[test]
    fn every_floor_rests_in_front_of_the_facade() {
        let layout = TowerLayout::default();
        let path = SpiralPath::new(&layout);
        for floor in 0..layout.floor_count() {
            let position = path.position_at(layout.progress_for_floor(floor));
            assert!(position.x.abs() < 1e-2, "floor {floor}: {position}");
            assert!((position.z - path.radius).abs() < 1e-2, "floor {floor}: {position}");
        }
    }

    #[test]
    fn one_revolution_per_floor_step() {
        let path = SpiralPath::default();
        let per_floor = 1.0 / 8.0;
        let swept = path.angle_at(0.25) - path.angle_at(0.25 + per_floor);
        assert!((swept - TAU).abs() < EPS);
    }

    #[test]
    fn floor_at_progress_rounds_to_nearest() {
        let path = SpiralPath::default();
        assert_eq!(path.floor_at_progress(0.0), 0);
        assert_eq!(path.floor_at_progress(0.06), 0);
        assert_eq!(path.floor_at_progress(0.07), 1);
        assert_eq!(path.floor_at_progress(0.625), 5);
        assert_eq!(path.floor_at_progress(1.7), 8);
    }
}
