use bevy::math::Vec3;
use thiserror::Error;

/// Failures that abort scene construction.
///
/// None of these are retried. They propagate to the system boundary in
/// `core::app_state::abort_scene_on_error`, which logs them and moves the app
/// into `AppState::Failed`.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no mesh with geometry found in {path}")]
    MissingGeometry { path: String },

    #[error("degenerate geometry: bounding box extent {extent} has no usable dimension")]
    DegenerateGeometry { extent: Vec3 },

    #[error("precondition failed: {0}")]
    Precondition(&'static str),

    #[error("failed to load {path}: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}
