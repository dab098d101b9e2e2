//! Shared defaults for the map scene: tiling, named map centres, model
//! normalisation, camera and lighting settings.

pub mod coordinate_system;
pub mod locations;
pub mod models;
pub mod path;
pub mod render_settings;
pub mod texture;
