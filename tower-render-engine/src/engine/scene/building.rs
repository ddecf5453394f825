use super::hit_test::{HitTarget, hit_targets_for_layout};
use crate::engine::assets::tower_layout::{FloorIndex, TowerLayout};
use crate::engine::assets::tower_manifest::FloorCategory;
use bevy::prelude::*;

/// Visible placeholder slab for one floor.
#[derive(Component, Debug, Clone, Copy)]
pub struct FloorSlab {
    pub floor: FloorIndex,
}

const SLAB_ALPHA: f32 = 0.22;
const ROOF_SLAB_THICKNESS: f32 = 0.3;

/// Spawn the invisible pick volumes. These carry no mesh, so they work in a
/// headless app as well.
pub fn spawn_hit_targets(
    mut commands: Commands,
    layout: Res<TowerLayout>,
    existing: Query<Entity, With<HitTarget>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let targets = hit_targets_for_layout(&layout);
    let count = targets.len();
    for (target, transform) in targets {
        commands.spawn((
            target,
            transform,
            GlobalTransform::from(transform),
            Name::new(format!("Hit target {}", target.floor)),
        ));
    }
    debug!("Spawned {} floor hit targets", count);
}

/// Translucent slab per floor, tinted with the floor accent.
pub fn spawn_building_stand_in(
    mut commands: Commands,
    layout: Res<TowerLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (w, h, d) = (
        layout.building_width,
        layout.floor_height,
        layout.building_depth,
    );

    for (floor, info) in layout.floors().iter().enumerate() {
        let (size, center) = match info.category {
            FloorCategory::BuildingFloor => (
                Vec3::new(w, h * 0.96, d),
                Vec3::new(0.0, floor as f32 * h + h * 0.5, 0.0),
            ),
            FloorCategory::Rooftop => (
                Vec3::new(w, ROOF_SLAB_THICKNESS, d),
                Vec3::new(0.0, layout.roof_height() + ROOF_SLAB_THICKNESS * 0.5, 0.0),
            ),
        };

        let material = materials.add(StandardMaterial {
            base_color: info.accent().with_alpha(SLAB_ALPHA),
            emissive: info.accent().to_linear() * 0.15,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });

        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(material),
            Transform::from_translation(center),
            FloorSlab { floor },
            Name::new(info.name.clone()),
        ));
    }
}
