use bevy::asset::AssetMetaCheck;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::MouseWheel;
use bevy::input::touch::TouchInput;
use bevy::prelude::*;
use bevy::window::{CursorMoved, WindowEvent};
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};

use crate::engine::assets::tower_layout::TowerLayout;
use crate::engine::assets::tower_manifest::TowerManifest;
use crate::engine::camera::camera_pose::{CameraPose, TowerCamera, apply_camera_pose};
use crate::engine::camera::camera_rig::{drive_camera_rig, rig_is_active};
use crate::engine::camera::camera_shake::{CameraShake, pause_shake_in_rooms, update_camera_shake};
use crate::engine::core::app_state::{AppState, NavigationSet};
use crate::engine::core::window_config::create_window_config;
use crate::engine::input::input_aggregator::{InputAggregator, tick_input_aggregator};
use crate::engine::input::pointer::{
    PointerTap, PointerTracker, read_mouse_input, read_touch_input, read_wheel_input,
};
use crate::engine::loading::manifest_loader::{
    ManifestLoader, install_layout, load_manifest_system, start_loading,
};
use crate::engine::scene::building::{spawn_building_stand_in, spawn_hit_targets};
use crate::rooms::events::{
    ActiveFloorChanged, CameraScriptFinished, ExitRoomRequest, FloorChangeRequest,
    GoToFloorRequest, HoverChanged, PickRequest, RoomEntered, RoomExited,
};
use crate::rooms::room_manager::RoomManager;
use crate::rooms::systems::{
    exit_on_escape, handle_navigation_requests, handle_pick_requests, handle_script_finished,
    play_camera_script, probe_hover, publish_room_notices, taps_to_pick_rays,
};
use crate::rpc::web_rpc::WebRpcPlugin;

const CLEAR_COLOR: Color = Color::srgb(0.02, 0.02, 0.05);

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers TowerManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<TowerManifest>::new(&["json"]))
        .add_plugins(NavigationPlugin)
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(CLEAR_COLOR))
        .init_resource::<ManifestLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            load_manifest_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), spawn_building_stand_in);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            update_floor_overlay.run_if(in_state(AppState::Running)),
        );
    }

    app
}

/// Everything the scroll navigation needs, independent of rendering and
/// windowing. Expects `AppState` to be registered by the caller.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        // Device events are normally registered by the input and window
        // plugins; adding them again is a no-op there and lets headless apps run.
        app.add_event::<MouseWheel>()
            .add_event::<TouchInput>()
            .add_event::<KeyboardInput>()
            .add_event::<CursorMoved>()
            .add_event::<WindowEvent>();

        app.add_event::<PointerTap>()
            .add_event::<PickRequest>()
            .add_event::<GoToFloorRequest>()
            .add_event::<FloorChangeRequest>()
            .add_event::<ExitRoomRequest>()
            .add_event::<CameraScriptFinished>()
            .add_event::<RoomEntered>()
            .add_event::<RoomExited>()
            .add_event::<ActiveFloorChanged>()
            .add_event::<HoverChanged>();

        // A layout inserted before the plugin wins over the built-in one.
        let layout = app
            .world()
            .get_resource::<TowerLayout>()
            .cloned()
            .unwrap_or_default();
        install_layout(app.world_mut(), layout);

        app.init_resource::<CameraShake>()
            .init_resource::<PointerTracker>();

        app.configure_sets(
            Update,
            (
                NavigationSet::Input,
                NavigationSet::Interaction,
                NavigationSet::Progress,
                NavigationSet::Shake,
                NavigationSet::Camera,
                NavigationSet::Script,
                NavigationSet::Apply,
                NavigationSet::Notify,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        app.add_systems(OnEnter(AppState::Running), spawn_hit_targets)
            .add_systems(
                Update,
                (
                    (
                        read_wheel_input,
                        read_touch_input,
                        read_mouse_input,
                        exit_on_escape,
                    )
                        .chain()
                        .in_set(NavigationSet::Input),
                    (
                        taps_to_pick_rays,
                        handle_pick_requests,
                        handle_navigation_requests,
                        probe_hover,
                    )
                        .chain()
                        .in_set(NavigationSet::Interaction),
                    tick_input_aggregator.in_set(NavigationSet::Progress),
                    (pause_shake_in_rooms, update_camera_shake)
                        .chain()
                        .in_set(NavigationSet::Shake),
                    drive_camera_rig
                        .run_if(rig_is_active)
                        .in_set(NavigationSet::Camera),
                    (play_camera_script, handle_script_finished)
                        .chain()
                        .in_set(NavigationSet::Script),
                    apply_camera_pose.in_set(NavigationSet::Apply),
                    publish_room_notices.in_set(NavigationSet::Notify),
                ),
            );
    }
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_tower_camera(commands: &mut Commands, pose: &CameraPose) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        pose.transform(),
        TowerCamera,
        Name::new("Tower camera"),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, pose: Res<CameraPose>) {
    spawn_lighting(&mut commands);
    spawn_tower_camera(&mut commands, &pose);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

/// Floor label shown in native builds, where no page surrounds the canvas.
#[derive(Component)]
struct FloorOverlayText;

fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                FloorOverlayText,
            ));
        });
}

fn update_floor_overlay(
    input: Res<InputAggregator>,
    room: Res<RoomManager>,
    layout: Res<TowerLayout>,
    mut query: Query<(&mut Text, &mut TextColor), With<FloorOverlayText>>,
) {
    let floor = room.active_floor().unwrap_or(input.current_floor());
    let Some(info) = layout.floor(floor) else {
        return;
    };

    for (mut text, mut colour) in &mut query {
        text.0 = format!("{}  {}  [{}]", info.name, info.label, room.state().as_str());
        colour.0 = info.accent();
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
