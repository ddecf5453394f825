use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::tower_layout::TowerLayout;
use crate::engine::assets::tower_manifest::TowerManifest;
use crate::engine::camera::camera_rig::CameraRig;
use crate::engine::camera::spiral_path::SpiralPath;
use crate::engine::camera::camera_pose::CameraPose;
use crate::engine::core::app_state::AppState;
use crate::engine::input::input_aggregator::InputAggregator;
use crate::rooms::room_manager::RoomManager;

const TOWER_MANIFEST_PATH: &str = "tower_manifest.json";

/// Camera starts on the rooftop.
const START_PROGRESS: f32 = 1.0;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<TowerManifest>>,
}

pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading tower manifest from {}", TOWER_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(TOWER_MANIFEST_PATH));
}

/// Wait for the manifest, install the layout it describes and move on to
/// `Running`. A bad or missing manifest keeps the built-in layout.
pub fn load_manifest_system(
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<TowerManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = manifest_loader.handle.as_ref() else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        match manifest.to_layout() {
            Ok(layout) => {
                info!(
                    "✓ Tower manifest loaded: {} floors ({} inside the building)",
                    layout.floor_count(),
                    layout.building_floor_count()
                );
                commands.queue(move |world: &mut World| install_layout(world, layout));
            }
            Err(err) => error!("Tower manifest rejected, keeping built-in layout: {}", err),
        }
        next_state.set(AppState::Running);
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        error!("Tower manifest failed to load, keeping built-in layout: {}", err);
        next_state.set(AppState::Running);
    }
}

/// Replace every layout-derived navigation resource. The camera is placed on
/// the rooftop and any room state is dropped.
pub fn install_layout(world: &mut World, layout: TowerLayout) {
    let path = SpiralPath::new(&layout);
    let rig = CameraRig::new(&path, START_PROGRESS);
    let pose = rig.pose(&path);

    world.insert_resource(InputAggregator::new(layout.floor_count()));
    world.insert_resource(pose);
    world.insert_resource(rig);
    world.insert_resource(path);
    world.insert_resource(RoomManager::default());
    world.insert_resource(layout);
}
