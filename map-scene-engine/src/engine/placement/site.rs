use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::geo::utm::UtmReference;

/// Where a normalised model ends up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPlacement {
    /// Keep the `(0, baseline, 0)` position chosen by the normaliser.
    #[default]
    Baseline,
    /// Move to a UTM32 position relative to the scene reference point.
    Utm { easting: f64, northing: f64 },
}

impl ModelPlacement {
    pub fn apply(&self, transform: &mut Transform, reference: &UtmReference) {
        match *self {
            ModelPlacement::Baseline => {}
            ModelPlacement::Utm { easting, northing } => {
                transform.translation = reference.to_world(easting, northing);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_keeps_translation() {
        let mut transform = Transform::from_xyz(0.0, 0.01, 0.0);
        ModelPlacement::Baseline.apply(&mut transform, &UtmReference::default());
        assert_eq!(transform.translation, Vec3::new(0.0, 0.01, 0.0));
    }

    #[test]
    fn test_utm_replaces_translation_only() {
        let reference = UtmReference {
            easting: 1000.0,
            northing: 2000.0,
            scale: 0.5,
        };
        let mut transform = Transform::from_xyz(0.0, 0.01, 0.0).with_scale(Vec3::splat(3.0));
        ModelPlacement::Utm {
            easting: 1010.0,
            northing: 2020.0,
        }
        .apply(&mut transform, &reference);

        assert_eq!(transform.translation, Vec3::new(5.0, 0.0, -10.0));
        assert_eq!(transform.scale, Vec3::splat(3.0));
    }

    #[test]
    fn test_placement_from_config() {
        let placement: ModelPlacement =
            serde_json::from_str(r#"{"utm": {"easting": 456500.0, "northing": 5428500.0}}"#)
                .unwrap();
        assert!(matches!(placement, ModelPlacement::Utm { .. }));
        let baseline: ModelPlacement = serde_json::from_str("\"baseline\"").unwrap();
        assert_eq!(baseline, ModelPlacement::Baseline);
    }
}
