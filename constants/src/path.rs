/// Scene configuration asset, relative to the asset root
pub const SCENE_CONFIG_PATH: &str = "scene.json";

/// Canvas element the web build renders into
pub const CANVAS_SELECTOR: &str = "#bevy";

/// Log filter handed to the log plugin
pub const LOG_FILTER: &str = "wgpu=error,naga=warn,map_scene_engine=debug";
