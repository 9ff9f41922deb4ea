//! Packing tiles into the shared atlas buffer.

use crate::config::ShadowConfig;
use crate::pixel_buffer::{PixelBuffer, StorageOrigin};

/// Pixel rectangle of a cell in the upright image (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A grid of equally sized cells addressed by slot index, row-major from
/// the top-left. The backing buffer is stored bottom-up.
pub struct Atlas {
    tile_size: u32,
    cells_per_row: u32,
    cells_per_column: u32,
    buffer: PixelBuffer,
}

impl Atlas {
    /// A zeroed atlas sized from `config`.
    pub fn new(config: &ShadowConfig) -> Self {
        Self {
            tile_size: config.tile_size,
            cells_per_row: config.cells_per_row(),
            cells_per_column: config.cells_per_column(),
            buffer: PixelBuffer::new(
                config.atlas_width,
                config.atlas_height,
                StorageOrigin::BottomUp,
            ),
        }
    }

    pub fn cells_per_row(&self) -> u32 {
        self.cells_per_row
    }

    pub fn capacity(&self) -> usize {
        self.cells_per_row as usize * self.cells_per_column as usize
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// (column, row) of the cell for `slot`.
    pub fn cell(&self, slot: u8) -> (u32, u32) {
        let slot = slot as u32;
        (slot % self.cells_per_row, slot / self.cells_per_row)
    }

    pub fn cell_rect(&self, slot: u8) -> CellRect {
        let (col, row) = self.cell(slot);
        CellRect {
            x: col * self.tile_size,
            y: row * self.tile_size,
            width: self.tile_size,
            height: self.tile_size,
        }
    }

    /// Copy `tile` into the cell for `slot`, overwriting whatever was there.
    ///
    /// Tile row `r` (counted from the top) lands on atlas storage row
    /// `(atlas_height - 1) - (cell_y + r)`, so the saved atlas shows the tile
    /// upright. Columns copy straight across.
    pub fn place_tile(&mut self, tile: &PixelBuffer, slot: u8) {
        debug_assert_eq!(tile.width(), self.tile_size);
        debug_assert_eq!(tile.height(), self.tile_size);
        debug_assert!((slot as usize) < self.capacity(), "slot {} outside atlas", slot);

        let rect = self.cell_rect(slot);
        let x0 = rect.x as usize;
        let x1 = x0 + self.tile_size as usize;
        let last_row = self.buffer.height() as usize - 1;

        for r in 0..self.tile_size {
            let src = tile.row(tile.storage_row(r));
            let dst_row = last_row - (rect.y + r) as usize;
            self.buffer.row_mut(dst_row)[x0..x1].copy_from_slice(src);
        }
    }
}
