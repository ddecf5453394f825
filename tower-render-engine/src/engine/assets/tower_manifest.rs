use crate::engine::assets::tower_layout::TowerLayout;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Explicit per-floor category. Scripted transitions pick their choreography
/// from this rather than from the floor's position in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorCategory {
    BuildingFloor,
    Rooftop,
}

/// Static metadata for one addressable floor. Only used for UI highlighting
/// and the stand-in scene tint, never for navigation decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorInfo {
    pub name: String,
    pub label: String,
    /// CSS hex colour, e.g. `#00ff88`.
    pub accent_color: String,
    pub category: FloorCategory,
}

impl FloorInfo {
    pub fn new(name: &str, label: &str, accent_color: &str, category: FloorCategory) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            accent_color: accent_color.to_string(),
            category,
        }
    }

    /// Accent colour parsed from the manifest, white when the hex is malformed.
    pub fn accent(&self) -> Color {
        Srgba::hex(&self.accent_color)
            .map(Color::from)
            .unwrap_or(Color::WHITE)
    }

    pub fn is_rooftop(&self) -> bool {
        self.category == FloorCategory::Rooftop
    }
}

/// Tower description as a Bevy asset. Mirrors `assets/tower_manifest.json`.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct TowerManifest {
    pub floors: Vec<FloorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_depth: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit_radius: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifestError {
    #[error("tower needs at least two floors, manifest lists {count}")]
    TooFewFloors { count: usize },
    #[error("tower manifest has no rooftop floor")]
    MissingRooftop,
    #[error("rooftop must be the last floor, found one at index {index}")]
    RooftopNotLast { index: usize },
    #[error("{field} must be positive, got {value}")]
    NonPositiveDimension { field: &'static str, value: f32 },
}

impl TowerManifest {
    /// Check the floor table: at least two floors and exactly one rooftop,
    /// which must be the top entry.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let count = self.floors.len();
        if count < 2 {
            return Err(ManifestError::TooFewFloors { count });
        }

        let last = count - 1;
        if let Some(index) = self
            .floors
            .iter()
            .position(|floor| floor.is_rooftop())
            .filter(|&index| index != last)
        {
            return Err(ManifestError::RooftopNotLast { index });
        }
        if !self.floors[last].is_rooftop() {
            return Err(ManifestError::MissingRooftop);
        }

        for (field, value) in [
            ("floor_height", self.floor_height),
            ("building_width", self.building_width),
            ("building_depth", self.building_depth),
            ("orbit_radius", self.orbit_radius),
        ] {
            if let Some(value) = value.filter(|v| !(*v > 0.0)) {
                return Err(ManifestError::NonPositiveDimension { field, value });
            }
        }

        Ok(())
    }

    /// Build the runtime layout, falling back to built-in dimensions for
    /// anything the manifest leaves out.
    pub fn to_layout(&self) -> Result<TowerLayout, ManifestError> {
        self.validate()?;

        let defaults = TowerLayout::default();
        Ok(TowerLayout::new(
            self.floors.clone(),
            self.floor_height.unwrap_or(defaults.floor_height),
            self.building_width.unwrap_or(defaults.building_width),
            self.building_depth.unwrap_or(defaults.building_depth),
            self.orbit_radius.unwrap_or(defaults.orbit_radius),
        ))
    }
}
