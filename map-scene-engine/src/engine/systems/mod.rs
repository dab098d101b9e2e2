//! Runtime diagnostics systems.

/// Native FPS text overlay fed by the frame time diagnostics.
#[cfg(not(target_arch = "wasm32"))]
pub mod fps_tracking;
