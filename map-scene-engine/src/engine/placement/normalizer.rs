use bevy::prelude::*;

use crate::engine::assets::bounds::BoundingBox;
use crate::engine::error::SceneError;

/// Target size and resting height of a normalised model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeSettings {
    pub target_size: f32,
    pub baseline: f32,
}

/// World-space bounds of a model whose mesh-space bounds are `local`.
///
/// The matrix is recomputed from `transform` so the result reflects any
/// scale applied earlier in the same frame.
pub fn world_bounds(transform: &Transform, local: &BoundingBox) -> BoundingBox {
    local.transformed(&transform.compute_matrix())
}

/// Scale a model uniformly so its largest world dimension equals
/// `settings.target_size`, then put its origin at `(0, baseline, 0)`.
///
/// The bounding-box minimum is not used for the height, so a model whose
/// pivot is not at its base will float or sink by that distance.
/// Returns the factor multiplied into the existing scale.
pub fn normalize_model(
    transform: &mut Transform,
    local: &BoundingBox,
    settings: &NormalizeSettings,
) -> Result<f32, SceneError> {
    let bounds = world_bounds(transform, local);
    let extent = bounds.size();
    let max_dim = bounds.max_dimension();

    if !(max_dim > 0.0 && max_dim.is_finite()) {
        return Err(SceneError::DegenerateGeometry { extent });
    }

    // Subnormal extents overflow the factor.
    let factor = settings.target_size / max_dim;
    if !factor.is_finite() {
        return Err(SceneError::DegenerateGeometry { extent });
    }
    transform.scale *= factor;
    transform.translation = Vec3::new(0.0, settings.baseline, 0.0);

    Ok(factor)
}
