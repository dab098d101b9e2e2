//! Scene content around the loaded models.
//!
//! Ground plane, lights, reference markers, the shared materials and the
//! animation catalogue attached to each model.

/// Animation clip catalogue and idle pose selection.
pub mod animation;

/// Textured ground plane aligned to the requested coordinate.
pub mod ground;

/// Clear colour, ambient light and the directional sun.
pub mod lighting;

/// Unit cubes positioned from crop-image pixel coordinates.
pub mod markers;

/// Model override, ground and marker materials.
pub mod materials;
