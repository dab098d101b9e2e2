use bevy::math::Vec3;
use constants::coordinate_system::{REF_EASTING, REF_NORTHING, UTM_SCALE};
use serde::{Deserialize, Serialize};

/// UTM32 origin of the world and the metre to world unit factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtmReference {
    pub easting: f64,
    pub northing: f64,
    pub scale: f64,
}

impl Default for UtmReference {
    fn default() -> Self {
        Self {
            easting: REF_EASTING,
            northing: REF_NORTHING,
            scale: UTM_SCALE,
        }
    }
}

impl UtmReference {
    /// World position of a UTM32 point with its base flattened to `y = 0`.
    /// Northing grows towards -Z.
    pub fn to_world(&self, easting: f64, northing: f64) -> Vec3 {
        let x = (easting - self.easting) * self.scale;
        let z = -(northing - self.northing) * self.scale;
        Vec3::new(x as f32, 0.0, z as f32)
    }
}
