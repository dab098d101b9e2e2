//! Core application setup and state management.
//!
//! Handles the engine lifecycle, window configuration, state transitions
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the app with logging, JSON config loading and the state-scheduled
/// scene construction systems.
pub mod app_setup;

/// Application state machine, loading transitions and the error boundary.
pub mod app_state;

/// Engine handle owning the Bevy app.
pub mod engine;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
