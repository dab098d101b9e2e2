use bevy::prelude::*;

use crate::engine::assets::scene_config::{MarkerConfig, SceneConfig};
use crate::engine::scene::materials::marker_material;

#[derive(Component)]
pub struct ReferenceMarker;

/// World position of a crop-image pixel on the marker plane.
pub fn marker_position(crop_px: [f32; 2], config: &MarkerConfig) -> Vec3 {
    let [ox, oy] = config.origin_px;
    Vec3::new(
        (crop_px[0] - ox) / config.px_per_unit,
        config.height,
        (crop_px[1] - oy) / config.px_per_unit,
    )
}

pub fn spawn_markers(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let markers = &config.markers;
    if markers.markers.is_empty() {
        return;
    }

    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    for marker in &markers.markers {
        let position = marker_position(marker.crop_px, markers);
        debug!("Marker {} at {position}", marker.name);
        commands.spawn((
            Name::new(marker.name.clone()),
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(marker_material(marker.color))),
            Transform::from_translation(position),
            ReferenceMarker,
        ));
    }
    println!("✓ {} reference marker(s) placed", markers.markers.len());
}
