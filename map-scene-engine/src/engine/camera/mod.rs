//! Scene camera: the orbit or fly rig and its viewport.
//!
//! The rig kind is picked from the scene configuration when the camera is
//! spawned and stays fixed afterwards.

/// Camera rig variants, their input handling and spawn system.
pub mod camera_rig;

/// Normalised viewport rectangle re-applied on window resize.
pub mod viewport;
