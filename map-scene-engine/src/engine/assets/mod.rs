//! Asset-side data for the map scene.
//!
//! Holds the JSON scene configuration and the bounding boxes used to
//! normalise imported models.

/// Axis-aligned bounds in mesh or world space, plus the per-model component.
pub mod bounds;

/// Scene configuration asset loaded from `scene.json`, with constant-backed defaults.
pub mod scene_config;
