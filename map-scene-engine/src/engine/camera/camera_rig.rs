use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::{
    ANGULAR_SENSIBILITY, BETA_EPSILON, FREE_CAMERA_LOOK_SENSITIVITY, FREE_CAMERA_POSITION,
    FREE_CAMERA_SPEED, INERTIA_EPSILON, LINE_WHEEL_DELTA, LOWER_RADIUS_LIMIT, ORBIT_ALPHA,
    ORBIT_BETA, ORBIT_INERTIA, ORBIT_RADIUS, PANNING_INERTIA, PANNING_SENSIBILITY,
    UPPER_RADIUS_LIMIT, WHEEL_DELTA_PERCENTAGE, WHEEL_PRECISION,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::camera::viewport::SceneViewport;
use crate::engine::error::SceneError;

/// Camera kind and its start parameters, as written in the scene config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraRigConfig {
    ArcRotate(OrbitSettings),
    Free(FreeSettings),
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        CameraRigConfig::ArcRotate(OrbitSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: [f32; 3],
    pub wheel_precision: f32,
    pub wheel_delta_percentage: f32,
    pub inertia: f32,
    pub panning_inertia: f32,
    pub lower_radius_limit: f32,
    pub upper_radius_limit: f32,
    pub angular_sensibility: f32,
    pub panning_sensibility: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            alpha: ORBIT_ALPHA,
            beta: ORBIT_BETA,
            radius: ORBIT_RADIUS,
            target: [0.0; 3],
            wheel_precision: WHEEL_PRECISION,
            wheel_delta_percentage: WHEEL_DELTA_PERCENTAGE,
            inertia: ORBIT_INERTIA,
            panning_inertia: PANNING_INERTIA,
            lower_radius_limit: LOWER_RADIUS_LIMIT,
            upper_radius_limit: UPPER_RADIUS_LIMIT,
            angular_sensibility: ANGULAR_SENSIBILITY,
            panning_sensibility: PANNING_SENSIBILITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeSettings {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub speed: f32,
    pub look_sensitivity: f32,
}

impl Default for FreeSettings {
    fn default() -> Self {
        Self {
            position: FREE_CAMERA_POSITION,
            look_at: [0.0; 3],
            speed: FREE_CAMERA_SPEED,
            look_sensitivity: FREE_CAMERA_LOOK_SENSITIVITY,
        }
    }
}

/// Point on the orbit sphere around `target`.
///
/// `alpha` is the longitude around Y and `beta` the angle down from +Y.
/// Z is mirrored so an orbit authored for a left-handed frame keeps its
/// layout in Bevy's right-handed one.
pub fn orbit_position(target: Vec3, alpha: f32, beta: f32, radius: f32) -> Vec3 {
    target
        + Vec3::new(
            radius * alpha.cos() * beta.sin(),
            radius * beta.cos(),
            -radius * alpha.sin() * beta.sin(),
        )
}

fn decay(value: f32, inertia: f32) -> f32 {
    let next = value * inertia;
    if next.abs() < INERTIA_EPSILON { 0.0 } else { next }
}

/// Orbit camera with inertial rotation, zoom and panning.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub settings: OrbitSettings,
    inertial_alpha: f32,
    inertial_beta: f32,
    inertial_radius: f32,
    inertial_pan: Vec2,
}

impl OrbitCamera {
    pub fn new(settings: OrbitSettings) -> Self {
        let mut camera = Self {
            alpha: settings.alpha,
            beta: settings.beta,
            radius: settings.radius,
            target: Vec3::from_array(settings.target),
            settings,
            inertial_alpha: 0.0,
            inertial_beta: 0.0,
            inertial_radius: 0.0,
            inertial_pan: Vec2::ZERO,
        };
        camera.clamp();
        camera
    }

    pub fn position(&self) -> Vec3 {
        orbit_position(self.target, self.alpha, self.beta, self.radius)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    /// Mouse drag in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.inertial_alpha -= delta.x / self.settings.angular_sensibility;
        self.inertial_beta -= delta.y / self.settings.angular_sensibility;
    }

    /// Wheel delta in pixels, positive zooms in.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let delta = if self.settings.wheel_delta_percentage > 0.0 {
            wheel_delta * 0.01 * self.settings.wheel_delta_percentage * self.radius
        } else {
            wheel_delta / (self.settings.wheel_precision * 40.0)
        };
        self.inertial_radius += delta;
    }

    /// Mouse drag in pixels, moves the target in the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        self.inertial_pan += Vec2::new(-delta.x, delta.y) / self.settings.panning_sensibility;
    }

    /// Advance one frame: apply the inertial offsets, then let them decay.
    pub fn step(&mut self) {
        if self.inertial_pan != Vec2::ZERO {
            let view = self.transform();
            self.target +=
                view.right() * self.inertial_pan.x + view.up() * self.inertial_pan.y;
        }

        self.alpha += self.inertial_alpha;
        self.beta += self.inertial_beta;
        self.radius -= self.inertial_radius;
        self.clamp();

        self.inertial_alpha = decay(self.inertial_alpha, self.settings.inertia);
        self.inertial_beta = decay(self.inertial_beta, self.settings.inertia);
        self.inertial_radius = decay(self.inertial_radius, self.settings.inertia);
        self.inertial_pan = Vec2::new(
            decay(self.inertial_pan.x, self.settings.panning_inertia),
            decay(self.inertial_pan.y, self.settings.panning_inertia),
        );
    }

    pub fn is_moving(&self) -> bool {
        self.inertial_alpha != 0.0
            || self.inertial_beta != 0.0
            || self.inertial_radius != 0.0
            || self.inertial_pan != Vec2::ZERO
    }

    fn clamp(&mut self) {
        self.beta = self.beta.clamp(BETA_EPSILON, PI - BETA_EPSILON);
        self.radius = self
            .radius
            .clamp(self.settings.lower_radius_limit, self.settings.upper_radius_limit);
    }
}

/// WASD fly camera with right-drag look.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub settings: FreeSettings,
}

impl FreeCamera {
    pub fn new(settings: FreeSettings) -> Self {
        let position = Vec3::from_array(settings.position);
        let direction = (Vec3::from_array(settings.look_at) - position).normalize_or(Vec3::NEG_Z);
        Self {
            position,
            yaw: (-direction.x).atan2(-direction.z),
            pitch: direction.y.clamp(-1.0, 1.0).asin(),
            settings,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }

    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.settings.look_sensitivity;
        self.pitch -= delta.y * self.settings.look_sensitivity;
        self.pitch = self.pitch.clamp(-1.55, 1.55);
    }

    /// Move along the view axes; `input` is (right, up, back) in [-1, 1].
    pub fn fly(&mut self, input: Vec3, speed_multiplier: f32, delta_secs: f32) {
        if input == Vec3::ZERO {
            return;
        }
        let rotation = self.rotation();
        let world_delta = rotation * Vec3::X * input.x + Vec3::Y * input.y + rotation * Vec3::Z * input.z;
        self.position +=
            world_delta.normalize_or_zero() * self.settings.speed * speed_multiplier * delta_secs;
    }
}

/// The scene camera. The kind is fixed when the rig is spawned.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum CameraRig {
    ArcRotate(OrbitCamera),
    Free(FreeCamera),
}

impl CameraRig {
    pub fn from_config(config: &CameraRigConfig) -> Self {
        match *config {
            CameraRigConfig::ArcRotate(settings) => CameraRig::ArcRotate(OrbitCamera::new(settings)),
            CameraRigConfig::Free(settings) => CameraRig::Free(FreeCamera::new(settings)),
        }
    }

    pub fn transform(&self) -> Transform {
        match self {
            CameraRig::ArcRotate(orbit) => orbit.transform(),
            CameraRig::Free(free) => free.transform(),
        }
    }
}

/// Spawn the scene camera. Requires a primary window to render into.
pub fn spawn_camera_rig(
    mut commands: Commands,
    config: Res<SceneConfig>,
    windows: Query<(), With<PrimaryWindow>>,
) -> Result<(), SceneError> {
    if windows.is_empty() {
        return Err(SceneError::Precondition("no primary window"));
    }

    let rig = CameraRig::from_config(&config.camera);
    let transform = rig.transform();
    let kind = match rig {
        CameraRig::ArcRotate(_) => "arc-rotate",
        CameraRig::Free(_) => "free",
    };

    commands.spawn((
        Name::new("SceneCamera"),
        Camera3d::default(),
        transform,
        rig,
        SceneViewport(config.viewport),
    ));
    println!("✓ {kind} camera spawned at {}", transform.translation);
    Ok(())
}

pub fn camera_rig_controller(
    mut camera_query: Query<(&mut Transform, &mut CameraRig), With<Camera3d>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let wheel_delta: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y * LINE_WHEEL_DELTA,
            MouseScrollUnit::Pixel => ev.y,
        })
        .sum();

    let Ok((mut camera_transform, mut rig)) = camera_query.single_mut() else {
        return;
    };

    match &mut *rig {
        CameraRig::ArcRotate(orbit) => {
            if mouse_delta != Vec2::ZERO {
                if mouse_button.pressed(MouseButton::Left) {
                    orbit.rotate(mouse_delta);
                } else if mouse_button.pressed(MouseButton::Right) {
                    orbit.pan(mouse_delta);
                }
            }
            if wheel_delta.abs() > f32::EPSILON {
                orbit.zoom(wheel_delta);
            }
            if orbit.is_moving() {
                orbit.step();
                *camera_transform = orbit.transform();
            }
        }
        CameraRig::Free(free) => {
            if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
                free.look(mouse_delta);
            }

            let mut move_input = Vec3::ZERO;
            if keyboard.pressed(KeyCode::KeyW) { move_input.z -= 1.0; }
            if keyboard.pressed(KeyCode::KeyS) { move_input.z += 1.0; }
            if keyboard.pressed(KeyCode::KeyD) { move_input.x += 1.0; }
            if keyboard.pressed(KeyCode::KeyA) { move_input.x -= 1.0; }
            if keyboard.pressed(KeyCode::KeyE) { move_input.y += 1.0; }
            if keyboard.pressed(KeyCode::KeyQ) { move_input.y -= 1.0; }

            // Shift = faster, ctrl = slower
            let mut multiplier = 1.0;
            if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) { multiplier *= 3.5; }
            if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) { multiplier *= 0.25; }
            free.fly(move_input, multiplier, time.delta_secs());

            let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
            camera_transform.translation = camera_transform.translation.lerp(free.position, lerp_speed);
            camera_transform.rotation = camera_transform.rotation.slerp(free.rotation(), lerp_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn test_default_orbit_position() {
        let orbit = OrbitCamera::new(OrbitSettings::default());
        let h = 20.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert_vec_close(orbit.position(), Vec3::new(0.0, h, -h));
    }

    #[test]
    fn test_orbit_looks_at_target() {
        let orbit = OrbitCamera::new(OrbitSettings {
            target: [5.0, 0.0, 5.0],
            ..default()
        });
        let transform = orbit.transform();
        let to_target = (orbit.target - transform.translation).normalize();
        assert_vec_close(*transform.forward(), to_target);
    }

    #[test]
    fn test_rotation_inertia_decays_to_rest() {
        let mut orbit = OrbitCamera::new(OrbitSettings::default());
        orbit.rotate(Vec2::new(-100.0, 0.0));

        orbit.step();
        let after_one = orbit.alpha;
        assert!((after_one - (ORBIT_ALPHA + 0.1)).abs() < 1e-6);

        for _ in 0..200 {
            orbit.step();
        }
        assert!(!orbit.is_moving());
        // Geometric series: total rotation is 0.1 / (1 - 0.9).
        assert!((orbit.alpha - (ORBIT_ALPHA + 1.0)).abs() < 0.02);
    }

    #[test]
    fn test_beta_and_radius_are_clamped() {
        let mut orbit = OrbitCamera::new(OrbitSettings {
            radius: 1.0,
            ..default()
        });
        assert_eq!(orbit.radius, LOWER_RADIUS_LIMIT);

        orbit.rotate(Vec2::new(0.0, 10_000.0));
        orbit.step();
        assert_eq!(orbit.beta, BETA_EPSILON);

        orbit.zoom(-1.0e9);
        orbit.step();
        assert_eq!(orbit.radius, UPPER_RADIUS_LIMIT);
    }

    #[test]
    fn test_zoom_scales_with_radius() {
        let mut near = OrbitCamera::new(OrbitSettings { radius: 10.0, ..default() });
        let mut far = OrbitCamera::new(OrbitSettings { radius: 100.0, ..default() });
        near.zoom(LINE_WHEEL_DELTA);
        far.zoom(LINE_WHEEL_DELTA);
        near.step();
        far.step();

        assert!((10.0 - near.radius - 0.12).abs() < 1e-4);
        assert!((100.0 - far.radius - 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_pan_moves_target_only_sideways() {
        let mut orbit = OrbitCamera::new(OrbitSettings::default());
        let before = orbit.position() - orbit.target;
        orbit.pan(Vec2::new(-100.0, 0.0));
        orbit.step();

        assert!(orbit.target.length() > 0.0);
        assert!(orbit.target.y.abs() < 1e-6);
        assert_vec_close(orbit.position() - orbit.target, before);
    }

    #[test]
    fn test_free_camera_faces_look_at() {
        let free = FreeCamera::new(FreeSettings {
            position: [0.0, 10.0, 10.0],
            look_at: [0.0, 0.0, 0.0],
            ..default()
        });
        assert!(free.yaw.abs() < 1e-6);
        assert!((free.pitch + std::f32::consts::FRAC_PI_4).abs() < 1e-5);

        let forward = free.rotation() * Vec3::NEG_Z;
        assert_vec_close(forward, Vec3::new(0.0, -1.0, -1.0).normalize());
    }

    #[test]
    fn test_free_camera_flies_forward() {
        let mut free = FreeCamera::new(FreeSettings {
            position: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            speed: 10.0,
            ..default()
        });
        free.fly(Vec3::new(0.0, 0.0, -1.0), 1.0, 0.5);
        assert_vec_close(free.position, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_rig_kind_follows_config() {
        let config: CameraRigConfig =
            serde_json::from_str(r#"{ "kind": "free", "speed": 5.0 }"#).unwrap();
        let rig = CameraRig::from_config(&config);
        assert!(matches!(rig, CameraRig::Free(ref free) if free.settings.speed == 5.0));

        let rig = CameraRig::from_config(&CameraRigConfig::default());
        assert!(matches!(rig, CameraRig::ArcRotate(_)));
    }
}
