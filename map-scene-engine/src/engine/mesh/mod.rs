//! Imported mesh handling for normalised scene models.
//!
//! Sub-mesh descriptors built from glTF nodes, the two selection policies
//! and CPU-side merging of several primitives into one mesh.

/// Sub-mesh descriptors and the first-with-geometry / merge-all policies.
pub mod selection;

/// Concatenation of transformed triangle meshes into a single mesh.
pub mod merge;
