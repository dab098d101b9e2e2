use bevy::math::DVec2;
use constants::coordinate_system::UTM32_ZOOM_ADJUST;
use constants::texture::EARTH_CIRCUMFERENCE_M;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The projection is only finite strictly inside the poles.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() < 90.0
            && self.longitude.abs() <= 180.0
    }
}

/// Slippy-map tile address at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: i64,
    pub y: i64,
}

impl TileIndex {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Tile service the ground texture comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    WebMercator,
    #[default]
    Utm32,
}

impl CoordinateSystem {
    pub fn zoom_adjust(&self) -> i32 {
        match self {
            CoordinateSystem::WebMercator => 0,
            CoordinateSystem::Utm32 => UTM32_ZOOM_ADJUST,
        }
    }

    pub fn effective_zoom(&self, zoom: i32) -> i32 {
        zoom + self.zoom_adjust()
    }
}

/// Continuous tile coordinates of `coord` at `zoom`.
///
/// Negative zoom levels are not clamped; `2^zoom` simply becomes a fraction.
pub fn fractional_tile(coord: GeoCoordinate, zoom: i32) -> DVec2 {
    let n = 2_f64.powi(zoom);
    let lat_rad = coord.latitude.to_radians();
    let x = (coord.longitude + 180.0) / 360.0 * n;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
    DVec2::new(x, y)
}

/// Tile containing `coord` at `zoom`.
pub fn tile_for(coord: GeoCoordinate, zoom: i32) -> TileIndex {
    let t = fractional_tile(coord, zoom);
    TileIndex::new(t.x.floor() as i64, t.y.floor() as i64)
}

/// Ground resolution of one pixel at `latitude` for `tile_size` pixel tiles.
pub fn meters_per_pixel(latitude: f64, zoom: i32, tile_size: u32) -> f64 {
    EARTH_CIRCUMFERENCE_M * latitude.to_radians().cos() / (f64::from(tile_size) * 2_f64.powi(zoom))
}

/// Square block of tiles centred on the tile containing a coordinate.
///
/// Cells are stored the way the ground texture request fills them: the tile
/// at offset `(i, j)` from the centre sits in row `radius - j`, column
/// `radius + i`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    radius: u32,
    zoom: i32,
    cells: Vec<Vec<TileIndex>>,
}

impl TileGrid {
    pub fn around(center: TileIndex, radius: u32, zoom: i32) -> Self {
        let n = i64::from(radius);
        let side = (2 * n + 1) as usize;
        let mut cells = vec![vec![center; side]; side];

        for i in -n..=n {
            for j in -n..=n {
                cells[(n - j) as usize][(n + i) as usize] = center.offset(i, j);
            }
        }

        Self {
            radius,
            zoom,
            cells,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Zoom level the indices are expressed at.
    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    /// Cells per side, always odd.
    pub fn side(&self) -> usize {
        self.cells.len()
    }

    pub fn len(&self) -> usize {
        self.side() * self.side()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn center(&self) -> TileIndex {
        let r = self.radius as usize;
        self.cells[r][r]
    }

    pub fn rows(&self) -> &[Vec<TileIndex>] {
        &self.cells
    }

    /// Tile at offset `(i, j)` from the centre, `None` outside the radius.
    pub fn at_offset(&self, i: i64, j: i64) -> Option<TileIndex> {
        let n = i64::from(self.radius);
        if i.abs() > n || j.abs() > n {
            return None;
        }
        Some(self.cells[(n - j) as usize][(n + i) as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Smallest x and y over all cells, the top-left tile of the stitched canvas.
    pub fn min_corner(&self) -> TileIndex {
        let n = i64::from(self.radius);
        self.center().offset(-n, -n)
    }
}

/// Locate the tile grid for a coordinate.
///
/// `zoom` is the requested level; the coordinate system's adjustment is added
/// before projecting. Invalid coordinates are not rejected here: they yield
/// meaningless indices and must be validated by the caller.
pub fn locate(
    coord: GeoCoordinate,
    zoom: i32,
    radius: u32,
    system: CoordinateSystem,
) -> TileGrid {
    let zoom = system.effective_zoom(zoom);
    TileGrid::around(tile_for(coord, zoom), radius, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KA_BAUM: GeoCoordinate = GeoCoordinate {
        latitude: 49.009599,
        longitude: 8.403940,
    };

    #[test]
    fn test_karlsruhe_utm32_single_tile() {
        let grid = locate(KA_BAUM, 13, 0, CoordinateSystem::Utm32);

        assert_eq!(grid.zoom(), 9);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.center(), TileIndex::new(267, 175));
        assert_eq!(grid.center(), tile_for(KA_BAUM, 9));
    }

    #[test]
    fn test_web_mercator_keeps_zoom() {
        let grid = locate(KA_BAUM, 13, 0, CoordinateSystem::WebMercator);
        assert_eq!(grid.zoom(), 13);
        assert_eq!(grid.center(), TileIndex::new(4287, 2812));
    }

    #[test]
    fn test_center_matches_direct_projection() {
        let coords = [
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(51.5, -0.12),
            GeoCoordinate::new(-33.86, 151.2),
            GeoCoordinate::new(84.9, 179.9),
            GeoCoordinate::new(-84.9, -179.9),
        ];
        for coord in coords {
            for zoom in 0..=18 {
                let grid = locate(coord, zoom, 2, CoordinateSystem::WebMercator);
                assert_eq!(grid.center(), tile_for(coord, zoom), "{coord:?} z{zoom}");
            }
        }
    }

    #[test]
    fn test_grid_size_and_offsets() {
        for radius in 0..4u32 {
            let grid = locate(KA_BAUM, 13, radius, CoordinateSystem::WebMercator);
            let n = i64::from(radius);
            let side = (2 * n + 1) as usize;
            let center = grid.center();

            assert_eq!(grid.side(), side);
            assert_eq!(grid.len(), side * side);
            assert_eq!(grid.iter().count(), side * side);

            for tile in grid.iter() {
                let (dx, dy) = (tile.x - center.x, tile.y - center.y);
                assert!(dx.abs() <= n && dy.abs() <= n);
            }
            for i in -n..=n {
                for j in -n..=n {
                    assert_eq!(grid.at_offset(i, j), Some(center.offset(i, j)));
                }
            }
            assert_eq!(grid.at_offset(n + 1, 0), None);
        }
    }

    #[test]
    fn test_rows_follow_fill_order() {
        let grid = TileGrid::around(TileIndex::new(10, 20), 1, 5);
        let rows = grid.rows();

        // Top row holds the largest y offset.
        assert_eq!(rows[0][0], TileIndex::new(9, 21));
        assert_eq!(rows[0][2], TileIndex::new(11, 21));
        assert_eq!(rows[2][0], TileIndex::new(9, 19));
        assert_eq!(grid.min_corner(), TileIndex::new(9, 19));
    }

    #[test]
    fn test_origin_tile_at_zoom_zero() {
        assert_eq!(tile_for(GeoCoordinate::new(0.0, 0.0), 0), TileIndex::new(0, 0));
        let t = fractional_tile(GeoCoordinate::new(0.0, 0.0), 1);
        assert!((t.x - 1.0).abs() < 1e-12);
        assert!((t.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_zoom_is_not_clamped() {
        let t = fractional_tile(KA_BAUM, -1);
        assert!(t.x > 0.0 && t.x < 0.5);
    }

    #[test]
    fn test_pole_is_invalid_and_non_finite() {
        let pole = GeoCoordinate::new(90.0, 0.0);
        assert!(!pole.is_valid());
        assert!(KA_BAUM.is_valid());
        let t = fractional_tile(GeoCoordinate::new(-90.0, 0.0), 3);
        assert!(!t.y.is_finite());
    }

    #[test]
    fn test_meters_per_pixel() {
        let equator = meters_per_pixel(0.0, 0, 256);
        assert!((equator - 156_543.033_9).abs() < 0.01);

        let karlsruhe = meters_per_pixel(KA_BAUM.latitude, 9, 256);
        assert!((karlsruhe - 200.55).abs() < 0.01);
    }

    #[test]
    fn test_coordinate_system_from_config() {
        let system: CoordinateSystem = serde_json::from_str("\"web_mercator\"").unwrap();
        assert_eq!(system, CoordinateSystem::WebMercator);
        assert_eq!(CoordinateSystem::default().zoom_adjust(), -4);
    }
}
