use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::SCENE_CONFIG_PATH;

use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::error::SceneError;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<SceneConfig>>,
}

// Start the loading process
pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    println!("Loading scene configuration from: {SCENE_CONFIG_PATH}");
    config_loader.handle = Some(asset_server.load(SCENE_CONFIG_PATH));
}

// Publish the configuration as a resource once it has loaded
pub fn load_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<SceneConfig>>,
) -> Result<(), SceneError> {
    if loading_progress.config_loaded {
        return Ok(());
    }

    let handle = config_loader
        .handle
        .as_ref()
        .ok_or(SceneError::Precondition("scene configuration was never requested"))?;

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        return Err(SceneError::AssetLoad {
            path: SCENE_CONFIG_PATH.to_string(),
            reason: err.to_string(),
        });
    }

    let Some(config) = configs.get(handle) else {
        return Ok(());
    };

    config.validate()?;
    info!(
        "Scene config: location {}, zoom {}, {} model(s)",
        config.location,
        config.map.zoom,
        config.models.len()
    );
    commands.insert_resource(config.clone());
    loading_progress.config_loaded = true;
    println!("✓ Scene configuration loaded successfully");
    Ok(())
}
