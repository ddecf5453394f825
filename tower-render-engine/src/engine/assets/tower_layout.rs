use crate::engine::assets::tower_manifest::{FloorCategory, FloorInfo};
use bevy::prelude::*;
use constants::tower::{
    BUILDING_DEPTH, BUILDING_WIDTH, FLOOR_EYE_RATIO, FLOOR_HEIGHT, ORBIT_RADIUS,
    ROOFTOP_EYE_OFFSET,
};
use constants::transitions::{INTERIOR_LIFT, ROOF_REST_Z};

/// Discrete addressable floor, `0..floor_count`. The last index is the rooftop.
pub type FloorIndex = usize;

/// Runtime description of the tower every navigation component is built from.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TowerLayout {
    floors: Vec<FloorInfo>,
    pub floor_height: f32,
    pub building_width: f32,
    pub building_depth: f32,
    pub orbit_radius: f32,
}

impl TowerLayout {
    pub fn new(
        floors: Vec<FloorInfo>,
        floor_height: f32,
        building_width: f32,
        building_depth: f32,
        orbit_radius: f32,
    ) -> Self {
        Self {
            floors,
            floor_height,
            building_width,
            building_depth,
            orbit_radius,
        }
    }

    pub fn floors(&self) -> &[FloorInfo] {
        &self.floors
    }

    pub fn floor(&self, index: FloorIndex) -> Option<&FloorInfo> {
        self.floors.get(index)
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn top_floor(&self) -> FloorIndex {
        self.floor_count().saturating_sub(1)
    }

    /// Floors that sit inside the building shell, i.e. everything but the roof.
    pub fn building_floor_count(&self) -> usize {
        self.floors
            .iter()
            .filter(|floor| floor.category == FloorCategory::BuildingFloor)
            .count()
    }

    pub fn contains(&self, index: FloorIndex) -> bool {
        index < self.floor_count()
    }

    /// Category of a floor; out-of-range indices resolve to the nearest floor.
    pub fn category(&self, index: FloorIndex) -> FloorCategory {
        self.floors
            .get(index.min(self.top_floor()))
            .map(|floor| floor.category)
            .unwrap_or(FloorCategory::BuildingFloor)
    }

    /// Clamp a possibly negative or oversized request onto a valid floor.
    pub fn clamp_floor(&self, index: isize) -> FloorIndex {
        index.clamp(0, self.top_floor() as isize) as FloorIndex
    }

    /// Target progress that corresponds exactly to a floor.
    pub fn progress_for_floor(&self, index: FloorIndex) -> f32 {
        let top = self.top_floor();
        if top == 0 {
            return 0.0;
        }
        index.min(top) as f32 / top as f32
    }

    /// Height of the roof slab.
    pub fn roof_height(&self) -> f32 {
        self.building_floor_count() as f32 * self.floor_height
    }

    /// Eye height when standing on the rooftop.
    pub fn rooftop_eye_height(&self) -> f32 {
        self.roof_height() + ROOFTOP_EYE_OFFSET
    }

    /// Eye height inside a regular floor.
    pub fn floor_eye_height(&self, index: FloorIndex) -> f32 {
        index as f32 * self.floor_height + self.floor_height * FLOOR_EYE_RATIO
    }

    /// Z of the front facade.
    pub fn facade_z(&self) -> f32 {
        self.building_depth * 0.5
    }

    /// Where the camera rests while a room is open on this floor.
    pub fn interior_rest_position(&self, index: FloorIndex) -> Vec3 {
        match self.category(index) {
            FloorCategory::Rooftop => Vec3::new(0.0, self.rooftop_eye_height(), ROOF_REST_Z),
            FloorCategory::BuildingFloor => {
                Vec3::new(0.0, self.floor_eye_height(index) + INTERIOR_LIFT, 0.0)
            }
        }
    }
}

impl Default for TowerLayout {
    fn default() -> Self {
        use FloorCategory::{BuildingFloor, Rooftop};

        let floors = vec![
            FloorInfo::new("1F", "CONTACT", "#00ff88", BuildingFloor),
            FloorInfo::new("2F", "COMPANY", "#00aaff", BuildingFloor),
            FloorInfo::new("3F", "RECRUITMENT", "#00ff88", BuildingFloor),
            FloorInfo::new("4F", "MEMBERS", "#00aaff", BuildingFloor),
            FloorInfo::new("5F", "CASE STUDY", "#ff4444", BuildingFloor),
            FloorInfo::new("6F", "PoC", "#ff00ff", BuildingFloor),
            FloorInfo::new("7F", "DX UNIT", "#ff00ff", BuildingFloor),
            FloorInfo::new("8F", "Dr.CMO", "#ff00ff", BuildingFloor),
            FloorInfo::new("RF", "PROJECT GROUP", "#ffffff", Rooftop),
        ];

        Self::new(
            floors,
            FLOOR_HEIGHT,
            BUILDING_WIDTH,
            BUILDING_DEPTH,
            ORBIT_RADIUS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::tower::{BUILDING_FLOORS, FLOOR_COUNT};

    #[test]
    fn default_layout_matches_constants() {
        let layout = TowerLayout::default();
        assert_eq!(layout.floor_count(), FLOOR_COUNT);
        assert_eq!(layout.building_floor_count(), BUILDING_FLOORS);
        assert_eq!(layout.top_floor(), 8);
        assert_eq!(layout.category(8), FloorCategory::Rooftop);
        assert_eq!(layout.category(3), FloorCategory::BuildingFloor);
    }

    #[test]
    fn clamps_floor_requests() {
        let layout = TowerLayout::default();
        assert_eq!(layout.clamp_floor(-3), 0);
        assert_eq!(layout.clamp_floor(4), 4);
        assert_eq!(layout.clamp_floor(42), 8);
    }

    #[test]
    fn floor_progress_is_exact_fraction() {
        let layout = TowerLayout::default();
        assert_eq!(layout.progress_for_floor(0), 0.0);
        assert_eq!(layout.progress_for_floor(5), 5.0 / 8.0);
        assert_eq!(layout.progress_for_floor(8), 1.0);
        assert_eq!(layout.progress_for_floor(99), 1.0);
    }

    #[test]
    fn interior_rest_depends_on_category() {
        let layout = TowerLayout::default();

        let roof = layout.interior_rest_position(8);
        assert_eq!(roof, Vec3::new(0.0, 8.0 * 4.0 + 1.5, 3.0));

        let third = layout.interior_rest_position(2);
        assert!((third.y - (2.0 * 4.0 + 4.0 * 0.55 + 0.8)).abs() < 1e-5);
        assert_eq!(third.z, 0.0);
    }
}
