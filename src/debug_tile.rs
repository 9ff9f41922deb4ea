//! Flat-colour placeholder tiles for checking atlas placement by eye.

use crate::pixel_buffer::{PixelBuffer, Rgba8};

/// Blue, cyan, green, yellow, red, magenta.
pub const DEBUG_PALETTE: [Rgba8; 6] = [
    [0, 0, 255, 255],
    [0, 255, 255, 255],
    [0, 255, 0, 255],
    [255, 255, 0, 255],
    [255, 0, 0, 255],
    [255, 0, 255, 255],
];

pub fn debug_color(slot: u8) -> Rgba8 {
    DEBUG_PALETTE[slot as usize % DEBUG_PALETTE.len()]
}

pub fn fill_debug_tile(tile: &mut PixelBuffer, slot: u8) {
    tile.fill(debug_color(slot));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_buffer::StorageOrigin;

    #[test]
    fn test_palette_cycles_every_six_slots() {
        assert_eq!(debug_color(0), debug_color(6));
        assert_eq!(debug_color(5), debug_color(41));
        assert_ne!(debug_color(0), debug_color(1));
    }

    #[test]
    fn test_fill_is_flat() {
        let mut tile = PixelBuffer::new(8, 8, StorageOrigin::TopDown);
        fill_debug_tile(&mut tile, 4);
        let image = tile.to_rgba_image();
        assert!(image.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }
}
