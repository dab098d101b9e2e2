use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::engine::assets::bounds::{BoundingBox, ModelBounds};
use crate::engine::assets::scene_config::{ModelSpec, SceneConfig};
use crate::engine::error::SceneError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::merge::{merge_meshes, mesh_positions, without_skinning};
use crate::engine::mesh::selection::{
    SelectionPolicy, SubMesh, all_with_geometry, first_with_geometry,
};
use crate::engine::placement::normalizer::normalize_model;
use crate::engine::scene::animation::AnimationCatalog;
use crate::engine::scene::materials::model_material;

/// A model asset in flight.
pub struct ModelRequest {
    pub spec: ModelSpec,
    pub handle: Handle<Gltf>,
    pub placed: bool,
}

#[derive(Resource, Default)]
pub struct ModelRequests {
    pub models: Vec<ModelRequest>,
}

/// Marker for a normalised, placed model.
#[derive(Component, Debug, Clone)]
pub struct PlacedModel {
    pub source: String,
    pub scale_factor: f32,
}

/// One renderable mesh of a selected model and its imported material.
#[derive(Debug, Clone)]
pub struct GeometryPart {
    pub mesh: Handle<Mesh>,
    pub material: Option<Handle<StandardMaterial>>,
}

/// Renderable geometry reduced from an import by a selection policy.
#[derive(Debug, Clone)]
pub struct SelectedGeometry {
    /// One entry for first-with-geometry, one per distinct material when merged.
    pub parts: Vec<GeometryPart>,
    /// Local transform of the chosen part, identity for merged meshes.
    pub transform: Transform,
    /// Mesh-space bounds over every part.
    pub bounds: BoundingBox,
    /// Sub-meshes the parts were built from.
    pub part_count: usize,
}

type MaterialGroup<'a> = (Option<Handle<StandardMaterial>>, Vec<&'a SubMesh>);

/// Group parts by material in order of first appearance.
fn group_by_material(parts: &[SubMesh]) -> Vec<MaterialGroup<'_>> {
    let mut groups: Vec<MaterialGroup<'_>> = Vec::new();
    for part in parts {
        match groups.iter_mut().find(|(material, _)| *material == part.material) {
            Some((_, members)) => members.push(part),
            None => groups.push((part.material.clone(), vec![part])),
        }
    }
    groups
}

/// Describe every node of a glTF in node order, one entry per primitive.
/// Nodes without a mesh are kept as geometry-less entries.
pub fn collect_sub_meshes(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
) -> Vec<SubMesh> {
    let index_of: HashMap<AssetId<GltfNode>, usize> = gltf
        .nodes
        .iter()
        .enumerate()
        .map(|(i, handle)| (handle.id(), i))
        .collect();

    let mut parents: Vec<Option<usize>> = vec![None; gltf.nodes.len()];
    for (i, handle) in gltf.nodes.iter().enumerate() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };
        for child in &node.children {
            if let Some(&c) = index_of.get(&child.id()) {
                parents[c] = Some(i);
            }
        }
    }

    let mut parts = Vec::new();
    for (i, handle) in gltf.nodes.iter().enumerate() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };
        let gltf_mesh = node.mesh.as_ref().and_then(|m| gltf_meshes.get(m));
        let Some(gltf_mesh) = gltf_mesh else {
            parts.push(SubMesh::empty(node.name.clone(), i, parents[i]));
            continue;
        };

        for (p, primitive) in gltf_mesh.primitives.iter().enumerate() {
            let vertex_count = meshes
                .get(&primitive.mesh)
                .map_or(0, |mesh| mesh.count_vertices());
            parts.push(
                SubMesh::with_mesh(
                    format!("{}.{p}", node.name),
                    i,
                    parents[i],
                    node.transform,
                    primitive.mesh.clone(),
                    vertex_count,
                )
                .with_material(primitive.material.clone()),
            );
        }
    }
    parts
}

/// Reduce `parts` following `policy` and measure the result.
///
/// Merge-all bakes every part into one mesh per material, so a multi-material
/// import keeps each of its materials.
pub fn select_geometry(
    parts: &[SubMesh],
    policy: SelectionPolicy,
    path: &str,
    meshes: &mut Assets<Mesh>,
) -> Result<SelectedGeometry, SceneError> {
    let missing = || SceneError::MissingGeometry {
        path: path.to_string(),
    };

    let (geometry, transform, part_count) = match policy {
        SelectionPolicy::FirstWithGeometry => {
            let part = first_with_geometry(parts, path)?;
            let handle = part.mesh.ok_or_else(missing)?;
            let stripped = meshes.get(&handle).and_then(without_skinning);
            let handle = match stripped {
                Some(mesh) => meshes.add(mesh),
                None => handle,
            };
            let geometry = vec![GeometryPart {
                mesh: handle,
                material: part.material,
            }];
            (geometry, part.transform, 1)
        }
        SelectionPolicy::MergeAll => {
            let selected = all_with_geometry(parts, path)?;
            let mut geometry = Vec::new();
            for (material, members) in group_by_material(&selected) {
                let merged = merge_meshes(members.iter().filter_map(|part| {
                    let mesh = meshes.get(part.mesh.as_ref()?)?;
                    Some((mesh, part.transform))
                }));
                if let Some(mesh) = merged {
                    geometry.push(GeometryPart {
                        mesh: meshes.add(mesh),
                        material,
                    });
                }
            }
            (geometry, Transform::IDENTITY, selected.len())
        }
    };

    let bounds = geometry
        .iter()
        .filter_map(|part| {
            meshes
                .get(&part.mesh)
                .and_then(mesh_positions)
                .and_then(BoundingBox::from_points)
        })
        .reduce(|a, b| a.union(&b))
        .ok_or_else(missing)?;

    Ok(SelectedGeometry {
        parts: geometry,
        transform,
        bounds,
        part_count,
    })
}

// Start every configured model load at once
pub fn request_models(
    mut loading_progress: ResMut<LoadingProgress>,
    mut requests: ResMut<ModelRequests>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.models_requested {
        return;
    }

    requests.models = config
        .models
        .iter()
        .map(|spec| {
            println!("Loading model '{}' from: {}", spec.name, spec.path);
            ModelRequest {
                spec: spec.clone(),
                handle: asset_server.load(spec.path.clone()),
                placed: false,
            }
        })
        .collect();
    loading_progress.models_total = requests.models.len();
    loading_progress.models_requested = true;
}

// Normalise and spawn each model as soon as it and its dependencies are loaded
#[allow(clippy::too_many_arguments)]
pub fn place_loaded_models(
    mut loading_progress: ResMut<LoadingProgress>,
    mut requests: ResMut<ModelRequests>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    clips: Res<Assets<AnimationClip>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) -> Result<(), SceneError> {
    for request in requests.models.iter_mut().filter(|r| !r.placed) {
        let spec = &request.spec;

        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&request.handle) {
            return Err(SceneError::AssetLoad {
                path: spec.path.clone(),
                reason: err.to_string(),
            });
        }
        if let Some(RecursiveDependencyLoadState::Failed(err)) =
            asset_server.get_recursive_dependency_load_state(&request.handle)
        {
            return Err(SceneError::AssetLoad {
                path: spec.path.clone(),
                reason: err.to_string(),
            });
        }
        if !asset_server.is_loaded_with_dependencies(&request.handle) {
            continue;
        }
        let Some(gltf) = gltfs.get(&request.handle) else {
            continue;
        };

        let parts = collect_sub_meshes(gltf, &gltf_nodes, &gltf_meshes, &meshes);
        debug!(
            "{}: {} sub-mesh(es), {} with geometry",
            spec.name,
            parts.len(),
            parts.iter().filter(|p| p.has_geometry).count()
        );

        let policy = SelectionPolicy::from_merge_flag(spec.merge);
        let selected = select_geometry(&parts, policy, &spec.path, &mut meshes)?;

        let mut transform = selected.transform;
        let factor = normalize_model(&mut transform, &selected.bounds, &spec.normalize_settings())?;
        spec.placement.apply(&mut transform, &config.utm_reference);

        let override_material = spec
            .apply_material
            .then(|| materials.add(model_material(&config.material)));
        let part_materials: Vec<Handle<StandardMaterial>> = selected
            .parts
            .iter()
            .map(|part| match (&override_material, &part.material) {
                (Some(material), _) | (None, Some(material)) => material.clone(),
                (None, None) => materials.add(StandardMaterial::default()),
            })
            .collect();

        let mut catalog = AnimationCatalog::from_clips(
            gltf.named_animations
                .iter()
                .filter_map(|(name, handle)| Some((name.as_ref(), clips.get(handle)?.duration()))),
        );
        catalog.log(&spec.name);
        if let Some(pose) = spec.idle_animation.as_deref() {
            match catalog.hold_pose(pose) {
                Some(frame) => info!("{}: holding '{pose}' at frame {frame}", spec.name),
                None if !catalog.is_empty() => {
                    warn!("{}: animation '{pose}' not found", spec.name)
                }
                None => {}
            }
        }

        let mesh_count = selected.parts.len();
        commands
            .spawn((
                Name::new(spec.name.clone()),
                transform,
                Visibility::default(),
                ModelBounds(selected.bounds),
                PlacedModel {
                    source: spec.path.clone(),
                    scale_factor: factor,
                },
                catalog,
            ))
            .with_children(|parent| {
                let meshes_with_materials = selected.parts.into_iter().zip(part_materials);
                for (i, (part, material)) in meshes_with_materials.enumerate() {
                    parent.spawn((
                        Name::new(format!("{}.{i}", spec.name)),
                        Mesh3d(part.mesh),
                        MeshMaterial3d(material),
                        Transform::IDENTITY,
                    ));
                }
            });

        println!(
            "✓ Model '{}' placed: {} part(s) in {mesh_count} mesh(es), scale factor {factor:.4}, at {}",
            spec.name, selected.part_count, transform.translation
        );
        request.placed = true;
        loading_progress.models_placed += 1;
    }
    Ok(())
}
