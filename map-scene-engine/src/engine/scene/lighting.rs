use bevy::prelude::*;
use constants::render_settings::HEMI_GROUND_WEIGHT;

use crate::engine::assets::scene_config::{LightingConfig, SceneConfig};

/// Flat colour approximating a white-sky hemispheric light with the given
/// ground colour. `weight` is the share of the ground colour.
pub fn hemispheric_ambient(ground_color: [f32; 3], weight: f32) -> [f32; 3] {
    let w = weight.clamp(0.0, 1.0);
    ground_color.map(|c| (1.0 - w) + c * w)
}

fn sun_transform(lighting: &LightingConfig) -> Transform {
    let direction = Vec3::from_array(lighting.sun_direction).normalize_or(Vec3::NEG_Y);
    Transform::from_translation(Vec3::from_array(lighting.sun_position))
        .looking_to(direction, Vec3::Y)
}

pub fn spawn_lighting(mut commands: Commands, config: Res<SceneConfig>) {
    let lighting = &config.lighting;

    let [r, g, b] = lighting.clear_color;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));

    let [r, g, b] = hemispheric_ambient(lighting.ground_color, HEMI_GROUND_WEIGHT);
    commands.insert_resource(AmbientLight {
        color: Color::srgb(r, g, b),
        brightness: lighting.ambient_brightness,
        ..default()
    });

    commands.spawn((
        Name::new("sun"),
        DirectionalLight {
            illuminance: lighting.sun_illuminance,
            shadows_enabled: true,
            ..default()
        },
        sun_transform(lighting),
    ));
    println!("✓ Lighting created");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemispheric_ambient_blend() {
        assert_eq!(hemispheric_ambient([0.5, 0.5, 1.0], 0.5), [0.75, 0.75, 1.0]);
        assert_eq!(hemispheric_ambient([0.0, 0.0, 0.0], 0.0), [1.0, 1.0, 1.0]);
        assert_eq!(hemispheric_ambient([0.2, 0.4, 0.6], 2.0), [0.2, 0.4, 0.6]);
    }

    #[test]
    fn test_sun_points_along_direction() {
        let lighting = LightingConfig::default();
        let transform = sun_transform(&lighting);
        let expected = Vec3::new(-1.0, -2.0, -1.0).normalize();

        assert!((*transform.forward() - expected).length() < 1e-5);
        assert_eq!(transform.translation, Vec3::new(2.0, 50.0, 2.0));
    }
}
