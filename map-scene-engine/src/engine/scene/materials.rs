use bevy::prelude::*;

use crate::engine::assets::scene_config::{MapConfig, MaterialConfig};

/// Shared PBR override for models: double sided, no back-face culling, opaque.
pub fn model_material(config: &MaterialConfig) -> StandardMaterial {
    let [r, g, b] = config.albedo;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        metallic: config.metallic,
        perceptual_roughness: config.roughness,
        double_sided: true,
        cull_mode: None,
        alpha_mode: AlphaMode::Opaque,
        ..default()
    }
}

pub fn ground_material(texture: Handle<Image>, map: &MapConfig) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        reflectance: map.ground_reflectance,
        perceptual_roughness: map.ground_roughness,
        ..default()
    }
}

/// Flat colour for reference markers, unaffected by lighting.
pub fn marker_material(color: [f32; 3]) -> StandardMaterial {
    let [r, g, b] = color;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        unlit: true,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_material_defaults() {
        let material = model_material(&MaterialConfig::default());

        assert_eq!(material.base_color, Color::srgb(0.8, 0.8, 0.8));
        assert_eq!(material.metallic, 0.0);
        assert_eq!(material.perceptual_roughness, 1.0);
        assert!(material.double_sided);
        assert!(material.cull_mode.is_none());
        assert!(matches!(material.alpha_mode, AlphaMode::Opaque));
    }

    #[test]
    fn test_ground_material_uses_texture() {
        let material = ground_material(Handle::default(), &MapConfig::default());
        assert!(material.base_color_texture.is_some());
        assert_eq!(material.reflectance, 0.5);
        assert_eq!(material.perceptual_roughness, 0.4);
    }
}
