//! RGBA8 pixel grids with an explicit storage origin.
//!
//! Tiles are generated top-down (storage row 0 is the top scanline) while
//! the atlas is stored bottom-up (storage row 0 is the last scanline). The
//! origin travels with the buffer so the packer and the encoder agree on it
//! without index tricks.

use image::{Rgba, RgbaImage};

use crate::tilemap::Tilemap;

pub type Rgba8 = [u8; 4];

/// Which scanline of the image storage row 0 holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageOrigin {
    /// Row 0 is the top of the image
    TopDown,
    /// Row 0 is the bottom of the image
    BottomUp,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    origin: StorageOrigin,
    pixels: Tilemap<Rgba8>,
}

impl PixelBuffer {
    /// A zeroed (fully transparent black) buffer.
    pub fn new(width: u32, height: u32, origin: StorageOrigin) -> Self {
        Self {
            origin,
            pixels: Tilemap::new(width as usize, height as usize),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height as u32
    }

    pub fn clear(&mut self) {
        self.pixels.clear();
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Storage row holding image row `y` (counted from the top).
    pub fn storage_row(&self, y: u32) -> usize {
        match self.origin {
            StorageOrigin::TopDown => y as usize,
            StorageOrigin::BottomUp => self.pixels.height - 1 - y as usize,
        }
    }

    /// Raw storage row, independent of the origin.
    pub fn row(&self, storage_row: usize) -> &[Rgba8] {
        self.pixels.row(storage_row)
    }

    pub fn row_mut(&mut self, storage_row: usize) -> &mut [Rgba8] {
        self.pixels.row_mut(storage_row)
    }

    /// Pixel at image coordinates (top-left origin).
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        *self.pixels.get(x as usize, self.storage_row(y))
    }

    /// Set pixel at image coordinates (top-left origin).
    pub fn set(&mut self, x: u32, y: u32, color: Rgba8) {
        let row = self.storage_row(y);
        self.pixels.set(x as usize, row, color);
    }

    /// Upright image for encoding, regardless of storage origin.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| Rgba(self.get(x, y)))
    }
}
