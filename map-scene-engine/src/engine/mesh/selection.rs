use bevy::prelude::*;

use crate::engine::error::SceneError;

/// One imported mesh primitive together with the node that carried it.
///
/// Nodes without a mesh are kept as descriptors too, with `has_geometry`
/// cleared, so the arrival order of the import is preserved.
#[derive(Debug, Clone)]
pub struct SubMesh {
    pub name: String,
    pub node: usize,
    pub parent: Option<usize>,
    pub vertex_count: usize,
    pub has_geometry: bool,
    /// Node transform relative to `parent`.
    pub transform: Transform,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Option<Handle<StandardMaterial>>,
}

impl SubMesh {
    /// Descriptor for a node that carries no mesh.
    pub fn empty(name: impl Into<String>, node: usize, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            node,
            parent,
            vertex_count: 0,
            has_geometry: false,
            transform: Transform::IDENTITY,
            mesh: None,
            material: None,
        }
    }

    /// Descriptor for a mesh primitive on a node.
    pub fn with_mesh(
        name: impl Into<String>,
        node: usize,
        parent: Option<usize>,
        transform: Transform,
        mesh: Handle<Mesh>,
        vertex_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            node,
            parent,
            vertex_count,
            has_geometry: vertex_count > 0,
            transform,
            mesh: Some(mesh),
            material: None,
        }
    }

    pub fn with_material(mut self, material: Option<Handle<StandardMaterial>>) -> Self {
        self.material = material;
        self
    }

    /// Drop the parent link; the local transform becomes the root transform.
    pub fn detach(mut self) -> Self {
        self.parent = None;
        self
    }
}

/// How a multi-mesh import is reduced to one renderable mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    FirstWithGeometry,
    MergeAll,
}

impl SelectionPolicy {
    pub fn from_merge_flag(merge: bool) -> Self {
        if merge {
            SelectionPolicy::MergeAll
        } else {
            SelectionPolicy::FirstWithGeometry
        }
    }
}

/// First sub-mesh in arrival order that has geometry, detached.
pub fn first_with_geometry(parts: &[SubMesh], path: &str) -> Result<SubMesh, SceneError> {
    parts
        .iter()
        .find(|part| part.has_geometry)
        .cloned()
        .map(SubMesh::detach)
        .ok_or_else(|| SceneError::MissingGeometry {
            path: path.to_string(),
        })
}

/// Every sub-mesh that has geometry, detached, in arrival order.
pub fn all_with_geometry(parts: &[SubMesh], path: &str) -> Result<Vec<SubMesh>, SceneError> {
    let selected: Vec<SubMesh> = parts
        .iter()
        .filter(|part| part.has_geometry)
        .cloned()
        .map(SubMesh::detach)
        .collect();

    if selected.is_empty() {
        return Err(SceneError::MissingGeometry {
            path: path.to_string(),
        });
    }
    Ok(selected)
}
