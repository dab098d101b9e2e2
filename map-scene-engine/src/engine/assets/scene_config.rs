use bevy::prelude::*;
use constants::coordinate_system::{UTM32_TILE_PATH, USE_UTM32, WEB_MERCATOR_TILE_PATH};
use constants::locations::{DEFAULT_LOCATION, find_map_center};
use constants::models::{
    BASELINE_HEIGHT, DEFAULT_ALBEDO, DEFAULT_METALLIC, DEFAULT_ROUGHNESS, IDLE_POSE, TARGET_SIZE,
};
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, GROUND_REFLECTANCE, GROUND_ROUGHNESS, HEMI_GROUND_COLOR,
    MARKER_HEIGHT, MARKER_ORIGIN_PX, MARKER_PX_PER_UNIT, SUN_DIRECTION, SUN_ILLUMINANCE,
    SUN_POSITION,
};
use constants::texture::{
    DEFAULT_ZOOM, GROUND_SIZE, MAX_CANVAS_SIDE_PX, NEIGHBOR_TILES, TILE_SIZE,
};
use serde::{Deserialize, Serialize};

use crate::engine::camera::camera_rig::CameraRigConfig;
use crate::engine::camera::viewport::NormalizedViewport;
use crate::engine::error::SceneError;
use crate::engine::geo::tile_locator::{CoordinateSystem, GeoCoordinate};
use crate::engine::geo::utm::UtmReference;
use crate::engine::placement::normalizer::NormalizeSettings;
use crate::engine::placement::site::ModelPlacement;

/// Complete scene description as a Bevy asset, loaded from `scene.json`.
/// Every field falls back to the workspace constants when omitted.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Name of one of the built-in map centres.
    pub location: String,
    /// Explicit centre, takes precedence over `location`.
    pub center: Option<GeoCoordinate>,
    pub map: MapConfig,
    pub models: Vec<ModelSpec>,
    pub material: MaterialConfig,
    pub utm_reference: UtmReference,
    pub camera: CameraRigConfig,
    pub viewport: NormalizedViewport,
    pub lighting: LightingConfig,
    pub markers: MarkerConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            center: None,
            map: MapConfig::default(),
            models: vec![
                ModelSpec {
                    name: "tree".to_string(),
                    path: "models/tree1.glb".to_string(),
                    merge: true,
                    ..default()
                },
                ModelSpec {
                    name: "building".to_string(),
                    path: "models/flach.glb".to_string(),
                    merge: true,
                    apply_material: true,
                    ..default()
                },
            ],
            material: MaterialConfig::default(),
            utm_reference: UtmReference::default(),
            camera: CameraRigConfig::default(),
            viewport: NormalizedViewport::default(),
            lighting: LightingConfig::default(),
            markers: MarkerConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Map centre the ground texture is requested for.
    pub fn resolve_center(&self) -> Result<GeoCoordinate, SceneError> {
        let center = match self.center {
            Some(center) => center,
            None => {
                let named = find_map_center(&self.location)
                    .ok_or(SceneError::Precondition("unknown map location"))?;
                GeoCoordinate::new(named.lat, named.lon)
            }
        };

        if !center.is_valid() {
            return Err(SceneError::InvalidCoordinate {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
        Ok(center)
    }

    /// Reject values that would make scene construction meaningless.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.resolve_center()?;
        if self.map.tile_size == 0 {
            return Err(SceneError::Precondition("tile size must be non-zero"));
        }
        if !matches!(self.map.canvas_side_px(), Some(side) if side <= MAX_CANVAS_SIDE_PX) {
            return Err(SceneError::Precondition(
                "ground canvas exceeds the maximum texture size",
            ));
        }
        if !(self.map.ground_size.is_finite() && self.map.ground_size > 0.0) {
            return Err(SceneError::Precondition("ground size must be positive"));
        }
        if self
            .models
            .iter()
            .any(|m| !(m.target_size.is_finite() && m.target_size > 0.0))
        {
            return Err(SceneError::Precondition("model target size must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Requested zoom before the coordinate-system adjustment.
    pub zoom: i32,
    pub neighbor_tiles: u32,
    pub coordinate_system: CoordinateSystem,
    pub web_mercator_tiles: String,
    pub utm32_tiles: String,
    pub tile_size: u32,
    pub ground_size: f32,
    /// Shift the ground so the map centre sits at the world origin.
    pub center_on_target: bool,
    pub ground_reflectance: f32,
    pub ground_roughness: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            neighbor_tiles: NEIGHBOR_TILES,
            coordinate_system: if USE_UTM32 {
                CoordinateSystem::Utm32
            } else {
                CoordinateSystem::WebMercator
            },
            web_mercator_tiles: WEB_MERCATOR_TILE_PATH.to_string(),
            utm32_tiles: UTM32_TILE_PATH.to_string(),
            tile_size: TILE_SIZE,
            ground_size: GROUND_SIZE,
            center_on_target: false,
            ground_reflectance: GROUND_REFLECTANCE,
            ground_roughness: GROUND_ROUGHNESS,
        }
    }
}

impl MapConfig {
    /// Side of the stitched canvas, `(2n + 1) * tile_size`, `None` on overflow.
    pub fn canvas_side_px(&self) -> Option<u32> {
        self.neighbor_tiles
            .checked_mul(2)?
            .checked_add(1)?
            .checked_mul(self.tile_size)
    }

    pub fn tile_template(&self) -> &str {
        match self.coordinate_system {
            CoordinateSystem::WebMercator => &self.web_mercator_tiles,
            CoordinateSystem::Utm32 => &self.utm32_tiles,
        }
    }
}

/// One model to load, normalise and place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    pub name: String,
    pub path: String,
    /// Merge every sub-mesh instead of taking the first one with geometry.
    pub merge: bool,
    /// Replace imported materials with the scene's PBR material.
    pub apply_material: bool,
    pub target_size: f32,
    pub baseline: f32,
    pub placement: ModelPlacement,
    pub idle_animation: Option<String>,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            merge: false,
            apply_material: false,
            target_size: TARGET_SIZE,
            baseline: BASELINE_HEIGHT,
            placement: ModelPlacement::Baseline,
            idle_animation: Some(IDLE_POSE.to_string()),
        }
    }
}

impl ModelSpec {
    pub fn normalize_settings(&self) -> NormalizeSettings {
        NormalizeSettings {
            target_size: self.target_size,
            baseline: self.baseline,
        }
    }
}

/// PBR override applied to models with `apply_material`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub albedo: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            albedo: DEFAULT_ALBEDO,
            metallic: DEFAULT_METALLIC,
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub ground_color: [f32; 3],
    pub sun_direction: [f32; 3],
    pub sun_position: [f32; 3],
    pub sun_illuminance: f32,
    pub clear_color: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: AMBIENT_BRIGHTNESS,
            ground_color: HEMI_GROUND_COLOR,
            sun_direction: SUN_DIRECTION,
            sun_position: SUN_POSITION,
            sun_illuminance: SUN_ILLUMINANCE,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

/// Reference cubes positioned from crop-image pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub origin_px: [f32; 2],
    pub px_per_unit: f32,
    pub height: f32,
    pub markers: Vec<MarkerSpec>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            origin_px: MARKER_ORIGIN_PX,
            px_per_unit: MARKER_PX_PER_UNIT,
            height: MARKER_HEIGHT,
            markers: vec![
                MarkerSpec {
                    name: "redCubeMarker".to_string(),
                    color: [1.0, 0.0, 0.0],
                    crop_px: [2307.29, 538.0],
                },
                MarkerSpec {
                    name: "blueCubeMarker".to_string(),
                    color: [0.0, 0.0, 1.0],
                    crop_px: [956.0, 1521.0],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub name: String,
    pub color: [f32; 3],
    pub crop_px: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: SceneConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.location, "kaBaum");
        assert_eq!(config.map.zoom, 13);
        assert_eq!(config.map.coordinate_system, CoordinateSystem::Utm32);
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.models[0].target_size, 20.0);
        assert_eq!(config.models[0].baseline, 0.01);
        assert!(matches!(config.camera, CameraRigConfig::ArcRotate(_)));
        assert!(config.viewport.is_full());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_model_spec() {
        let config: SceneConfig = serde_json::from_str(
            r#"{
                "location": "kaZoo",
                "map": { "coordinate_system": "web_mercator", "neighbor_tiles": 1 },
                "models": [{ "name": "man", "path": "models/man.glb", "target_size": 2.0 }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.map.tile_template(), WEB_MERCATOR_TILE_PATH);
        assert_eq!(config.map.neighbor_tiles, 1);
        assert_eq!(config.map.tile_size, 256);
        let man = &config.models[0];
        assert!(!man.merge);
        assert_eq!(man.normalize_settings().target_size, 2.0);
        assert_eq!(man.idle_animation.as_deref(), Some("HumanArmature|Man_Idle"));

        let center = config.resolve_center().unwrap();
        assert_eq!(center, GeoCoordinate::new(48.99672, 8.40214));
    }

    #[test]
    fn test_explicit_center_wins() {
        let config: SceneConfig = serde_json::from_str(
            r#"{ "location": "nowhere", "center": { "latitude": 10.0, "longitude": 20.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.resolve_center().unwrap(), GeoCoordinate::new(10.0, 20.0));
    }

    #[test]
    fn test_unknown_location_is_precondition() {
        let config = SceneConfig {
            location: "nowhere".to_string(),
            ..default()
        };
        assert!(matches!(
            config.resolve_center(),
            Err(SceneError::Precondition(_))
        ));
    }

    #[test]
    fn test_pole_center_is_invalid() {
        let config = SceneConfig {
            center: Some(GeoCoordinate::new(90.0, 0.0)),
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_canvas_side_is_bounded() {
        let mut config = SceneConfig::default();
        config.map.neighbor_tiles = 15;
        assert_eq!(config.map.canvas_side_px(), Some(7936));
        assert!(config.validate().is_ok());

        config.map.neighbor_tiles = 16;
        assert_eq!(config.map.canvas_side_px(), Some(8448));
        assert!(matches!(config.validate(), Err(SceneError::Precondition(_))));

        config.map.neighbor_tiles = u32::MAX / 2;
        config.map.tile_size = 512;
        assert_eq!(config.map.canvas_side_px(), None);
        assert!(matches!(config.validate(), Err(SceneError::Precondition(_))));
    }

    #[test]
    fn test_non_positive_target_size_is_rejected() {
        let mut config = SceneConfig::default();
        config.models[0].target_size = 0.0;
        assert!(config.validate().is_err());
    }
}
