/// Largest model dimension after normalisation (world units)
pub const TARGET_SIZE: f32 = 20.0;

/// Height at which a normalised model origin is placed
pub const BASELINE_HEIGHT: f32 = 0.01;

/// Default PBR override: light grey, non-metallic, fully rough
pub const DEFAULT_ALBEDO: [f32; 3] = [0.8, 0.8, 0.8];
pub const DEFAULT_METALLIC: f32 = 0.0;
pub const DEFAULT_ROUGHNESS: f32 = 1.0;

/// Frame rate the animation frame ranges are expressed in
pub const ANIMATION_FRAME_RATE: f32 = 60.0;

/// Idle pose started on character models when present
pub const IDLE_POSE: &str = "HumanArmature|Man_Idle";
