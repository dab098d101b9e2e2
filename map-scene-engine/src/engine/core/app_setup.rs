// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::LOG_FILTER;

// Crate engine modules
use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::camera::camera_rig::{camera_rig_controller, spawn_camera_rig};
use crate::engine::camera::viewport::apply_scene_viewport;
use crate::engine::core::app_state::{
    AppState, abort_scene_on_error, transition_to_building_scene, transition_to_running,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::ground::spawn_ground_when_ready;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::markers::spawn_markers;

// Loading
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::loading::model_loader::{ModelRequests, place_loaded_models, request_models};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_loader::{
    GroundTileRequests, request_ground_tiles, stitch_ground_tiles,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneConfig>::new(&["json"]));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<GroundTileRequests>()
        .init_resource::<ModelRequests>();

    // State-based system scheduling
    app.add_systems(Startup, start_loading)
        .add_systems(
            Update,
            (
                load_config_system.pipe(abort_scene_on_error),
                transition_to_building_scene,
            )
                .chain()
                .run_if(in_state(AppState::LoadingConfig)),
        )
        .add_systems(
            OnEnter(AppState::BuildingScene),
            (
                spawn_camera_rig.pipe(abort_scene_on_error),
                spawn_lighting,
                spawn_markers,
                request_ground_tiles.pipe(abort_scene_on_error),
                request_models,
            ),
        )
        .add_systems(
            Update,
            (place_loaded_models.pipe(abort_scene_on_error), transition_to_running)
                .chain()
                .run_if(in_state(AppState::BuildingScene)),
        )
        // The ground texture is independent of model construction.
        .add_systems(
            Update,
            (stitch_ground_tiles, spawn_ground_when_ready)
                .chain()
                .run_if(in_state(AppState::BuildingScene).or(in_state(AppState::Running))),
        );

    // Runtime systems
    app.add_systems(
        Update,
        (camera_rig_controller, apply_scene_viewport)
            .run_if(not(in_state(AppState::LoadingConfig))),
    );

    // FPS overlay only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        use crate::engine::systems::fps_tracking::{create_fps_overlay, fps_text_update_system};
        app.add_systems(Startup, create_fps_overlay)
            .add_systems(Update, fps_text_update_system);
    }

    app
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

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
