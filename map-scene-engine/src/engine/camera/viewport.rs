use bevy::prelude::*;
use bevy::render::camera::Viewport;
use bevy::window::{PrimaryWindow, WindowResized};
use serde::{Deserialize, Serialize};

/// Camera viewport as fractions of the window, origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedViewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for NormalizedViewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl NormalizedViewport {
    pub fn is_full(&self) -> bool {
        *self == Self::default()
    }

    /// Physical position (top-left origin) and size inside a window of
    /// `window` pixels. `None` when the rectangle covers no pixels.
    pub fn physical_rect(&self, window: UVec2) -> Option<(UVec2, UVec2)> {
        let x0 = self.x.clamp(0.0, 1.0);
        let y0 = self.y.clamp(0.0, 1.0);
        let x1 = (self.x + self.width).clamp(0.0, 1.0);
        let y1 = (self.y + self.height).clamp(0.0, 1.0);

        let w = window.as_vec2();
        let left = (x0 * w.x).round() as u32;
        let right = (x1 * w.x).round() as u32;
        // Flip to the top-left origin Bevy uses.
        let top = ((1.0 - y1) * w.y).round() as u32;
        let bottom = ((1.0 - y0) * w.y).round() as u32;

        if right <= left || bottom <= top {
            return None;
        }
        Some((UVec2::new(left, top), UVec2::new(right - left, bottom - top)))
    }

    pub fn to_viewport(&self, window: UVec2) -> Option<Viewport> {
        if self.is_full() {
            return None;
        }
        let (physical_position, physical_size) = self.physical_rect(window)?;
        Some(Viewport {
            physical_position,
            physical_size,
            ..default()
        })
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SceneViewport(pub NormalizedViewport);

/// Re-apply each camera's normalised viewport when the window size changes
/// or the camera was just spawned.
pub fn apply_scene_viewport(
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Camera, Ref<SceneViewport>)>,
) {
    let window_changed = resized.read().count() > 0;
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.physical_size();

    for (mut camera, viewport) in &mut cameras {
        if !window_changed && !viewport.is_added() {
            continue;
        }
        if viewport.0.physical_rect(size).is_none() && !viewport.0.is_full() {
            warn!("Viewport {:?} is empty for window {size}", viewport.0);
        }
        camera.viewport = viewport.0.to_viewport(size);
    }
}
