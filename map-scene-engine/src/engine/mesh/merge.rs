use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};

/// Bake each part's transform into its vertices and concatenate the parts
/// into one indexed triangle list.
///
/// Parts that are not triangle lists or have no `Float32x3` positions are
/// skipped. Normals and UVs are kept only when every merged part has them;
/// missing normals are recomputed. Returns `None` when nothing was merged.
pub fn merge_meshes<'a>(parts: impl IntoIterator<Item = (&'a Mesh, Transform)>) -> Option<Mesh> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut all_normals = true;
    let mut all_uvs = true;
    let mut merged = 0usize;

    for (mesh, transform) in parts {
        if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
            warn!(
                "Skipping {:?} primitive while merging",
                mesh.primitive_topology()
            );
            continue;
        }
        let Some(VertexAttributeValues::Float32x3(part_positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            warn!("Skipping primitive without Float32x3 positions while merging");
            continue;
        };

        let matrix = transform.compute_matrix();
        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
        let base = positions.len() as u32;
        let count = part_positions.len();

        positions.extend(
            part_positions
                .iter()
                .map(|p| matrix.transform_point3(Vec3::from_array(*p)).to_array()),
        );

        match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(part_normals)) if part_normals.len() == count => {
                normals.extend(part_normals.iter().map(|n| {
                    (normal_matrix * Vec3::from_array(*n))
                        .normalize_or_zero()
                        .to_array()
                }));
            }
            _ => all_normals = false,
        }

        match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(part_uvs)) if part_uvs.len() == count => {
                uvs.extend_from_slice(part_uvs);
            }
            _ => all_uvs = false,
        }

        let mut part_indices: Vec<u32> = match mesh.indices() {
            Some(part) => part.iter().map(|i| base + i as u32).collect(),
            None => (base..base + count as u32).collect(),
        };
        // Mirroring transforms flip the winding.
        if matrix.determinant() < 0.0 {
            for triangle in part_indices.chunks_exact_mut(3) {
                triangle.swap(1, 2);
            }
        }
        indices.extend(part_indices);
        merged += 1;
    }

    if merged == 0 {
        return None;
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    if all_normals {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    }
    if all_uvs {
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    }
    mesh.insert_indices(Indices::U32(indices));
    if !all_normals {
        mesh.compute_normals();
    }

    Some(mesh)
}

/// Mesh-space positions of a mesh, if they are `Float32x3`.
pub fn mesh_positions(mesh: &Mesh) -> Option<&[[f32; 3]]> {
    match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(positions) => Some(positions.as_slice()),
        _ => None,
    }
}

/// Copy of `mesh` without joint attributes, so it renders as a static mesh
/// once detached from its skeleton. `None` if the mesh carries no skinning.
pub fn without_skinning(mesh: &Mesh) -> Option<Mesh> {
    if !mesh.contains_attribute(Mesh::ATTRIBUTE_JOINT_INDEX)
        && !mesh.contains_attribute(Mesh::ATTRIBUTE_JOINT_WEIGHT)
    {
        return None;
    }
    let mut stripped = mesh.clone();
    stripped.remove_attribute(Mesh::ATTRIBUTE_JOINT_INDEX);
    stripped.remove_attribute(Mesh::ATTRIBUTE_JOINT_WEIGHT);
    Some(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::bounds::BoundingBox;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        );
        mesh
    }

    #[test]
    fn test_merges_cuboids_with_transforms() {
        let cube = Mesh::from(Cuboid::new(1.0, 1.0, 1.0));
        let vertices = cube.count_vertices();
        let index_count = cube.indices().map_or(0, |i| i.len());

        let merged = merge_meshes([
            (&cube, Transform::IDENTITY),
            (&cube, Transform::from_xyz(3.0, 0.0, 0.0)),
        ])
        .unwrap();

        assert_eq!(merged.count_vertices(), vertices * 2);
        assert_eq!(merged.indices().map_or(0, |i| i.len()), index_count * 2);
        assert!(merged.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert!(merged.attribute(Mesh::ATTRIBUTE_UV_0).is_some());

        let bounds = BoundingBox::from_points(mesh_positions(&merged).unwrap()).unwrap();
        assert_eq!(bounds.min, Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(bounds.max, Vec3::new(3.5, 0.5, 0.5));
    }

    #[test]
    fn test_second_part_indices_are_offset() {
        let merged = merge_meshes([
            (&triangle(), Transform::IDENTITY),
            (&triangle(), Transform::from_xyz(0.0, 1.0, 0.0)),
        ])
        .unwrap();

        let indices: Vec<usize> = merged.indices().unwrap().iter().collect();
        assert_eq!(indices, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_missing_normals_are_recomputed() {
        let merged = merge_meshes([(&triangle(), Transform::IDENTITY)]).unwrap();

        assert!(merged.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert!(merged.attribute(Mesh::ATTRIBUTE_UV_0).is_none());
    }

    #[test]
    fn test_mirrored_part_flips_winding() {
        let merged = merge_meshes([(
            &triangle(),
            Transform::from_scale(Vec3::new(-1.0, 1.0, 1.0)),
        )])
        .unwrap();

        let indices: Vec<usize> = merged.indices().unwrap().iter().collect();
        assert_eq!(indices, [0, 2, 1]);
    }

    #[test]
    fn test_without_skinning_strips_joints() {
        assert!(without_skinning(&triangle()).is_none());

        let mut skinned = triangle();
        skinned.insert_attribute(Mesh::ATTRIBUTE_JOINT_WEIGHT, vec![[1.0, 0.0, 0.0, 0.0]; 3]);
        let stripped = without_skinning(&skinned).unwrap();

        assert!(!stripped.contains_attribute(Mesh::ATTRIBUTE_JOINT_WEIGHT));
        assert_eq!(stripped.count_vertices(), 3);
    }

    #[test]
    fn test_non_triangle_parts_are_skipped() {
        let mut lines = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
        lines.insert_attribute(Mesh::ATTRIBUTE_POSITION, vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);

        assert!(merge_meshes([(&lines, Transform::IDENTITY)]).is_none());
        assert!(merge_meshes(std::iter::empty()).is_none());

        let merged = merge_meshes([(&lines, Transform::IDENTITY), (&triangle(), Transform::IDENTITY)])
            .unwrap();
        assert_eq!(merged.count_vertices(), 3);
    }
}
