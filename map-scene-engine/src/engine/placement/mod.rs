//! Model normalisation and placement on the ground plane.

/// Uniform scaling of a model to a target size at a fixed baseline height.
pub mod normalizer;

/// Final model position: baseline or UTM32 coordinates.
pub mod site;
