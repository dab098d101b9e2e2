use bevy::math::{Vec2, Vec3};

use super::tile_locator::{GeoCoordinate, TileGrid, TileIndex, fractional_tile, meters_per_pixel};

/// Geometric metadata of a stitched ground texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTextureInfo {
    /// Pixel of the requested coordinate inside the canvas, origin top-left.
    pub target_px: Vec2,
    pub width_px: u32,
    pub height_px: u32,
    pub meters_per_pixel: f64,
    pub center_tile: TileIndex,
}

impl GroundTextureInfo {
    /// Describe the canvas stitched from `grid` for a request at `coord`.
    pub fn for_request(coord: GeoCoordinate, grid: &TileGrid, tile_size: u32) -> Self {
        let side = grid.side() as u32 * tile_size;
        let origin = grid.min_corner();
        let t = fractional_tile(coord, grid.zoom());
        let target_px = Vec2::new(
            ((t.x - origin.x as f64) * f64::from(tile_size)) as f32,
            ((t.y - origin.y as f64) * f64::from(tile_size)) as f32,
        );

        Self {
            target_px,
            width_px: side,
            height_px: side,
            meters_per_pixel: meters_per_pixel(coord.latitude, grid.zoom(), tile_size),
            center_tile: grid.center(),
        }
    }
}

/// How the stitched canvas maps onto the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundAlignment {
    /// World units per canvas pixel.
    pub ground_scale: f32,
    /// Metres covered by one world unit.
    pub unit_size: f32,
    /// Target coordinate on the ground plane (x, z), ground centred at the origin.
    pub target: Vec2,
}

impl GroundAlignment {
    pub fn compute(info: &GroundTextureInfo, ground_size: f32) -> Self {
        let ground_scale = ground_size / info.width_px as f32;
        let unit_size = info.meters_per_pixel as f32 / ground_scale;
        let half = Vec2::new(info.width_px as f32, info.height_px as f32) * 0.5;
        // Canvas rows grow southwards, which is +Z.
        let target = (info.target_px - half) * ground_scale;

        Self {
            ground_scale,
            unit_size,
            target,
        }
    }

    /// Translation that moves the target coordinate onto the world origin.
    pub fn recenter_offset(&self) -> Vec3 {
        Vec3::new(-self.target.x, 0.0, -self.target.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geo::tile_locator::{CoordinateSystem, locate};

    fn karlsruhe() -> GeoCoordinate {
        GeoCoordinate::new(49.009599, 8.403940)
    }

    #[test]
    fn test_single_tile_info() {
        let grid = locate(karlsruhe(), 13, 0, CoordinateSystem::Utm32);
        let info = GroundTextureInfo::for_request(karlsruhe(), &grid, 256);

        assert_eq!(info.width_px, 256);
        assert_eq!(info.height_px, 256);
        assert_eq!(info.center_tile, TileIndex::new(267, 175));
        assert!((info.target_px.x - 243.78).abs() < 0.01);
        assert!((info.target_px.y - 207.70).abs() < 0.01);
    }

    #[test]
    fn test_neighbours_shift_target_pixel() {
        let single = locate(karlsruhe(), 13, 0, CoordinateSystem::Utm32);
        let wide = locate(karlsruhe(), 13, 2, CoordinateSystem::Utm32);
        let a = GroundTextureInfo::for_request(karlsruhe(), &single, 256);
        let b = GroundTextureInfo::for_request(karlsruhe(), &wide, 256);

        assert_eq!(b.width_px, 5 * 256);
        assert!((b.target_px - a.target_px - Vec2::splat(512.0)).length() < 1e-3);
        assert_eq!(a.center_tile, b.center_tile);
    }

    #[test]
    fn test_alignment_scales() {
        let info = GroundTextureInfo {
            target_px: Vec2::new(128.0, 128.0),
            width_px: 256,
            height_px: 256,
            meters_per_pixel: 200.0,
            center_tile: TileIndex::new(0, 0),
        };
        let alignment = GroundAlignment::compute(&info, 512.0);

        assert_eq!(alignment.ground_scale, 2.0);
        assert_eq!(alignment.unit_size, 100.0);
        assert_eq!(alignment.target, Vec2::ZERO);
        assert_eq!(alignment.recenter_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_alignment_target_offset() {
        let info = GroundTextureInfo {
            target_px: Vec2::new(192.0, 64.0),
            width_px: 256,
            height_px: 256,
            meters_per_pixel: 1.0,
            center_tile: TileIndex::new(0, 0),
        };
        let alignment = GroundAlignment::compute(&info, 512.0);

        // East of centre and north of centre (north is -Z).
        assert_eq!(alignment.target, Vec2::new(128.0, -128.0));
        assert_eq!(alignment.recenter_offset(), Vec3::new(-128.0, 0.0, 128.0));
    }
}
