/// Edge length of a single map tile in pixels
pub const TILE_SIZE: u32 = 256;

/// Edge length of the square ground plane in world units
pub const GROUND_SIZE: f32 = 512.0;

/// Requested zoom level before the coordinate-system adjustment
pub const DEFAULT_ZOOM: i32 = 13;

/// Neighbouring tiles loaded around the centre tile on each side
pub const NEIGHBOR_TILES: u32 = 0;

/// RGBA fill for tiles that failed to load
pub const MISSING_TILE_RGBA: [u8; 4] = [128, 128, 128, 255];

/// Equatorial circumference used for ground resolution (metres)
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

/// Largest stitched canvas side, wgpu's default `max_texture_dimension_2d`
pub const MAX_CANVAS_SIDE_PX: u32 = 8192;

/// Bytes per pixel of the stitched ground canvas (RGBA8)
pub const CANVAS_BYTES_PER_PIXEL: usize = 4;
