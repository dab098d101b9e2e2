use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Arc-rotate camera start pose
pub const ORBIT_ALPHA: f32 = FRAC_PI_2;
pub const ORBIT_BETA: f32 = FRAC_PI_4;
pub const ORBIT_RADIUS: f32 = 20.0;

/// Larger is slower wheel zoom
pub const WHEEL_PRECISION: f32 = 100.0;
/// Zoom step as a fraction of the current radius per wheel line
pub const WHEEL_DELTA_PERCENTAGE: f32 = 0.01;
/// Velocity kept per frame after input stops (0 stops immediately)
pub const ORBIT_INERTIA: f32 = 0.9;
pub const PANNING_INERTIA: f32 = 0.9;
pub const LOWER_RADIUS_LIMIT: f32 = 2.0;
pub const UPPER_RADIUS_LIMIT: f32 = 5000.0;

/// Mouse sensitivities
pub const ANGULAR_SENSIBILITY: f32 = 1000.0;
pub const PANNING_SENSIBILITY: f32 = 1000.0;

/// Keeps beta away from the poles
pub const BETA_EPSILON: f32 = 0.01;

/// Inertial offsets below this are dropped
pub const INERTIA_EPSILON: f32 = 0.001;

/// Wheel delta reported for one line-based scroll step
pub const LINE_WHEEL_DELTA: f32 = 120.0;

/// Free camera movement in world units per second
pub const FREE_CAMERA_SPEED: f32 = 20.0;
pub const FREE_CAMERA_LOOK_SENSITIVITY: f32 = 0.0035;
pub const FREE_CAMERA_POSITION: [f32; 3] = [0.0, 20.0, 20.0];

/// Ambient light standing in for the two hemispheric lights
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const HEMI_GROUND_COLOR: [f32; 3] = [0.5, 0.5, 1.0];
pub const HEMI_GROUND_WEIGHT: f32 = 0.5;

/// Sun direction, right-handed, Y up
pub const SUN_DIRECTION: [f32; 3] = [-1.0, -2.0, -1.0];
pub const SUN_POSITION: [f32; 3] = [2.0, 50.0, 2.0];
pub const SUN_ILLUMINANCE: f32 = 2_000.0;

/// Ground material reflectivity
pub const GROUND_REFLECTANCE: f32 = 0.5;
pub const GROUND_ROUGHNESS: f32 = 0.4;

/// Marker placement from crop pixel coordinates
pub const MARKER_ORIGIN_PX: [f32; 2] = [1500.0, 904.0];
pub const MARKER_PX_PER_UNIT: f32 = 30.0;
pub const MARKER_HEIGHT: f32 = 0.7;
