pub mod assets;
pub mod camera;
pub mod core;
pub mod error;
pub mod geo;
pub mod loading;
pub mod mesh;
pub mod placement;
pub mod scene;
pub mod systems;
