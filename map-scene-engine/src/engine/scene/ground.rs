use bevy::prelude::*;

use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::geo::ground_alignment::GroundAlignment;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_loader::GroundTexture;
use crate::engine::scene::materials::ground_material;

#[derive(Component)]
pub struct GroundPlane {
    pub alignment: GroundAlignment,
}

/// Ground plane translation for the configured alignment.
pub fn ground_translation(alignment: &GroundAlignment, center_on_target: bool) -> Vec3 {
    if center_on_target {
        alignment.recenter_offset()
    } else {
        Vec3::ZERO
    }
}

/// Spawn the textured ground plane once the stitched texture exists.
/// Texture rows run north to south, which is -Z to +Z on the plane.
pub fn spawn_ground_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    ground_texture: Option<Res<GroundTexture>>,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if loading_progress.ground_spawned {
        return;
    }
    let Some(ground_texture) = ground_texture else {
        return;
    };

    let map = &config.map;
    let alignment = GroundAlignment::compute(&ground_texture.info, map.ground_size);
    info!(
        "Ground scale {:.4} units/px, unit size {:.3} m, target at ({:.3}, {:.3})",
        alignment.ground_scale, alignment.unit_size, alignment.target.x, alignment.target.y
    );

    let material = materials.add(ground_material(ground_texture.image.clone(), map));
    let mesh = meshes.add(Plane3d::default().mesh().size(map.ground_size, map.ground_size));

    commands.spawn((
        Name::new("ground"),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(ground_translation(&alignment, map.center_on_target)),
        GroundPlane { alignment },
    ));

    loading_progress.ground_spawned = true;
    println!("✓ Ground plane created ({0}x{0})", map.ground_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    const ALIGNMENT: GroundAlignment = GroundAlignment {
        ground_scale: 2.0,
        unit_size: 100.0,
        target: Vec2::new(-12.5, 30.0),
    };

    #[test]
    fn test_ground_stays_centred_by_default() {
        assert_eq!(ground_translation(&ALIGNMENT, false), Vec3::ZERO);
    }

    #[test]
    fn test_center_on_target_moves_target_to_origin() {
        let offset = ground_translation(&ALIGNMENT, true);
        let target_world = Vec3::new(ALIGNMENT.target.x, 0.0, ALIGNMENT.target.y) + offset;
        assert_eq!(target_world, Vec3::ZERO);
    }

    #[test]
    fn test_plane_texture_top_is_north() {
        let mesh = Mesh::from(Plane3d::default().mesh().size(4.0, 4.0));
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("plane has no positions");
        };
        let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute(Mesh::ATTRIBUTE_UV_0)
        else {
            panic!("plane has no uvs");
        };

        // v = 0 is the first texture row, which must be the -Z edge.
        for (position, uv) in positions.iter().zip(uvs) {
            if uv[1] == 0.0 {
                assert_eq!(position[2], -2.0);
            } else {
                assert_eq!(position[2], 2.0);
            }
        }
    }
}
