use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use constants::texture::{CANVAS_BYTES_PER_PIXEL, MISSING_TILE_RGBA};

/// RGBA8 canvas the ground tiles are stitched into, row 0 at the top.
#[derive(Debug, Clone)]
pub struct TileCanvas {
    tiles_per_side: u32,
    tile_size: u32,
    data: Vec<u8>,
}

impl TileCanvas {
    /// Canvas for a square block of tiles, pre-filled with the missing-tile colour.
    pub fn new(tiles_per_side: u32, tile_size: u32) -> Self {
        let side = tiles_per_side as usize * tile_size as usize;
        Self {
            tiles_per_side,
            tile_size,
            data: MISSING_TILE_RGBA.repeat(side * side),
        }
    }

    /// Width and height in pixels.
    pub fn side_px(&self) -> u32 {
        self.tiles_per_side.saturating_mul(self.tile_size)
    }

    /// Copy one tile into cell `(column, row)`.
    ///
    /// Fails without touching the canvas if the cell is outside the canvas or
    /// the tile is not an RGBA8 image of `tile_size` pixels.
    pub fn blit(&mut self, column: u32, row: u32, tile: &Image) -> Result<(), String> {
        if column >= self.tiles_per_side || row >= self.tiles_per_side {
            return Err(format!("cell ({column}, {row}) is outside the canvas"));
        }
        let format = tile.texture_descriptor.format;
        if !matches!(
            format,
            TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm
        ) {
            return Err(format!("unsupported tile format {format:?}"));
        }
        if tile.width() != self.tile_size || tile.height() != self.tile_size {
            return Err(format!(
                "tile is {}x{}, expected {}x{}",
                tile.width(),
                tile.height(),
                self.tile_size,
                self.tile_size
            ));
        }
        let Some(pixels) = tile.data.as_ref() else {
            return Err("tile has no pixel data".to_string());
        };

        let row_bytes = self.tile_size as usize * CANVAS_BYTES_PER_PIXEL;
        let canvas_row_bytes = self.side_px() as usize * CANVAS_BYTES_PER_PIXEL;
        if pixels.len() < row_bytes * self.tile_size as usize {
            return Err("tile pixel data is truncated".to_string());
        }

        let x_offset = column as usize * row_bytes;
        for (y, src) in pixels.chunks_exact(row_bytes).take(self.tile_size as usize).enumerate() {
            let canvas_y = (row * self.tile_size) as usize + y;
            let start = canvas_y * canvas_row_bytes + x_offset;
            self.data[start..start + row_bytes].copy_from_slice(src);
        }
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.side_px() as usize + x as usize) * CANVAS_BYTES_PER_PIXEL;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn into_image(self) -> Image {
        let side = self.side_px();
        Image::new(
            Extent3d {
                width: side,
                height: side,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }
}
