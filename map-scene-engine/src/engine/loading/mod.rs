//! Asset loading and scene construction systems.
//!
//! Manages the pipeline from scene configuration through ground tile
//! stitching and model normalisation, with progress tracking for the
//! state transitions.

/// Scene configuration loading from JSON.
///
/// Validates the configuration and publishes it as a resource.
pub mod config_loader;

/// glTF model loading, sub-mesh selection, normalisation and placement.
///
/// Every configured model loads concurrently and is spawned as soon as it is ready.
pub mod model_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// RGBA8 canvas the ground tiles are stitched into.
pub mod tile_canvas;

/// Ground tile requests for the located tile grid and the stitched texture.
///
/// Failed tiles are replaced with a placeholder colour.
pub mod texture_loader;
