use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::error::SceneError;
use crate::engine::geo::ground_alignment::GroundTextureInfo;
use crate::engine::geo::tile_locator::{GeoCoordinate, TileGrid, TileIndex, locate};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::tile_canvas::TileCanvas;

/// Tile loads in flight for the ground texture.
#[derive(Resource, Default)]
pub struct GroundTileRequests {
    pub center: Option<GeoCoordinate>,
    pub grid: Option<TileGrid>,
    pub tiles: Vec<(TileIndex, Handle<Image>)>,
}

/// Stitched ground texture and where the requested coordinate lies in it.
#[derive(Resource, Debug, Clone)]
pub struct GroundTexture {
    pub image: Handle<Image>,
    pub info: GroundTextureInfo,
}

/// Expand a `{z}/{x}/{y}` path template for one tile.
pub fn tile_path(template: &str, zoom: i32, tile: TileIndex) -> String {
    template
        .replace("{z}", &zoom.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

// Locate the tile grid for the map centre and request every tile
pub fn request_ground_tiles(
    mut loading_progress: ResMut<LoadingProgress>,
    mut requests: ResMut<GroundTileRequests>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
) -> Result<(), SceneError> {
    if loading_progress.ground_requested {
        return Ok(());
    }

    let center = config.resolve_center()?;
    let map = &config.map;
    let grid = locate(center, map.zoom, map.neighbor_tiles, map.coordinate_system);
    info!(
        "Ground tiles for ({:.6}, {:.6}): {:?} zoom {}, centre tile {:?}, {} tile(s)",
        center.latitude,
        center.longitude,
        map.coordinate_system,
        grid.zoom(),
        grid.center(),
        grid.len()
    );

    requests.tiles = grid
        .iter()
        .map(|tile| {
            let path = tile_path(map.tile_template(), grid.zoom(), tile);
            debug!("Requesting tile {path}");
            (tile, asset_server.load(path))
        })
        .collect();
    requests.center = Some(center);
    requests.grid = Some(grid);
    loading_progress.ground_requested = true;
    Ok(())
}

// Stitch the tiles once every load has either finished or failed
pub fn stitch_ground_tiles(
    mut loading_progress: ResMut<LoadingProgress>,
    requests: Res<GroundTileRequests>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut commands: Commands,
) {
    if loading_progress.ground_ready || !loading_progress.ground_requested {
        return;
    }
    let (Some(center), Some(grid)) = (requests.center, requests.grid.as_ref()) else {
        return;
    };

    // A tile is settled once its image exists or its load has failed.
    let settled = requests.tiles.iter().all(|(_, handle)| {
        images.contains(handle)
            || matches!(asset_server.get_load_state(handle), Some(LoadState::Failed(_)))
    });
    if !settled {
        return;
    }

    let tile_size = config.map.tile_size;
    let origin = grid.min_corner();
    let mut canvas = TileCanvas::new(grid.side() as u32, tile_size);
    let mut missing = 0;

    for (tile, handle) in &requests.tiles {
        let column = (tile.x - origin.x) as u32;
        let row = (tile.y - origin.y) as u32;
        let result = images
            .get(handle)
            .ok_or_else(|| "load failed".to_string())
            .and_then(|image| canvas.blit(column, row, image));
        if let Err(reason) = result {
            warn!("Tile {tile:?} replaced with placeholder: {reason}");
            missing += 1;
        }
    }

    let info = GroundTextureInfo::for_request(center, grid, tile_size);
    info!(
        "Ground texture {}x{} px, target pixel {}, {:.3} m/px",
        info.width_px, info.height_px, info.target_px, info.meters_per_pixel
    );

    let image = images.add(canvas.into_image());
    commands.insert_resource(GroundTexture { image, info });
    loading_progress.ground_ready = true;
    println!(
        "✓ Ground texture stitched from {} tile(s), {missing} missing",
        requests.tiles.len()
    );
}
