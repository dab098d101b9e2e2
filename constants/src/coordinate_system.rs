/// Zoom offset applied when tiles come from the UTM32 tile service
pub const UTM32_ZOOM_ADJUST: i32 = -4;

/// UTM32 reference point that maps to the world origin
pub const REF_EASTING: f64 = 456_463.942;
pub const REF_NORTHING: f64 = 5_428_482.729;

/// Metres to world units for UTM placed models
pub const UTM_SCALE: f64 = 0.1;

/// Use the UTM32 tile service by default
pub const USE_UTM32: bool = true;

/// Default path template for web mercator tiles, relative to the asset root
pub const WEB_MERCATOR_TILE_PATH: &str = "tiles/osm/{z}/{x}/{y}.png";

/// Default path template for UTM32 tiles, relative to the asset root
pub const UTM32_TILE_PATH: &str = "tiles/utm32/{z}/{x}/{y}.png";
