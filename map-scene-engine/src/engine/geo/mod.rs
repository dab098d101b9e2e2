//! Geographic to world mapping for the map ground plane.
//!
//! Slippy-map tile lookup, stitched canvas metadata and UTM32 placement.

/// Web mercator tile projection and the tile grid around a coordinate.
pub mod tile_locator;

/// Canvas metadata and the mapping of canvas pixels onto the ground plane.
pub mod ground_alignment;

/// UTM32 positions relative to the scene reference point.
pub mod utm;
