//! Shadow tile rendering.
//!
//! A tile is rendered in two passes over a continuous field: the edge pass
//! combines up to four edge ramps by their Euclidean norm, the corner pass
//! combines up to four corner falloffs by their maximum. The passes are
//! merged per texel with `max`, then quantized into the alpha channel of an
//! otherwise white RGBA tile.

use crate::config::ShadowConfig;
use crate::falloff::{corner_falloff, edge_falloff, flip};
use crate::neighbors::NeighborMask;
use crate::pixel_buffer::{PixelBuffer, StorageOrigin};
use crate::tilemap::Tilemap;

#[inline]
fn active(set: bool, shadow: f32) -> f32 {
    if set { shadow } else { 0.0 }
}

/// Edge shadow at texel (x, y), top-left origin.
pub fn side_shadow(x: u32, y: u32, mask: NeighborMask, config: &ShadowConfig) -> f32 {
    let size = config.tile_size;
    let shadow = [
        active(mask.west(), edge_falloff(x, config.spread_side)),
        active(mask.east(), edge_falloff(flip(x, size), config.spread_side)),
        active(mask.north(), edge_falloff(y, config.spread_up)),
        active(mask.south(), edge_falloff(flip(y, size), config.spread_down)),
    ];

    shadow.iter().map(|s| s * s).sum::<f32>().sqrt().min(1.0)
}

/// Corner shadow at texel (x, y), top-left origin.
pub fn corner_shadow(x: u32, y: u32, mask: NeighborMask, config: &ShadowConfig) -> f32 {
    let size = config.tile_size;
    let (fx, fy) = (flip(x, size), flip(y, size));
    let side = config.spread_side;
    let shadow = [
        active(mask.north_west(), corner_falloff(x, y, config.spread_up, side)),
        active(mask.north_east(), corner_falloff(fx, y, config.spread_up, side)),
        active(mask.south_east(), corner_falloff(fx, fy, config.spread_down, side)),
        active(mask.south_west(), corner_falloff(x, fy, config.spread_down, side)),
    ];

    shadow.into_iter().fold(0.0, f32::max)
}

/// Overwrite `field` with the edge pass.
pub fn render_side_pass(field: &mut Tilemap<f32>, mask: NeighborMask, config: &ShadowConfig) {
    for (x, y, value) in field.iter_mut() {
        *value = side_shadow(x as u32, y as u32, mask, config);
    }
}

/// Merge the corner pass into `field`, keeping the stronger shadow.
pub fn render_corner_pass(field: &mut Tilemap<f32>, mask: NeighborMask, config: &ShadowConfig) {
    for (x, y, value) in field.iter_mut() {
        *value = value.max(corner_shadow(x as u32, y as u32, mask, config));
    }
}

/// Continuous shadow intensity for a whole tile, in [0, 1].
pub fn render_shadow_field(mask: NeighborMask, config: &ShadowConfig) -> Tilemap<f32> {
    let size = config.tile_size as usize;
    let mut field = Tilemap::new(size, size);
    render_side_pass(&mut field, mask, config);
    render_corner_pass(&mut field, mask, config);
    field
}

#[inline]
pub fn encode_alpha(shadow: f32) -> u8 {
    (shadow.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A fresh, top-down tile buffer sized for `config`.
pub fn new_tile(config: &ShadowConfig) -> PixelBuffer {
    PixelBuffer::new(config.tile_size, config.tile_size, StorageOrigin::TopDown)
}

/// Render the shadow for `mask` into `tile`, replacing its contents.
pub fn render_tile(tile: &mut PixelBuffer, mask: NeighborMask, config: &ShadowConfig) {
    debug_assert_eq!(tile.width(), config.tile_size);
    debug_assert_eq!(tile.height(), config.tile_size);

    let field = render_shadow_field(mask, config);
    tile.clear();
    for (x, y, &shadow) in field.iter() {
        tile.set(x as u32, y as u32, [255, 255, 255, encode_alpha(shadow)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::NeighborMask as M;

    fn tile_for(bits: u8, config: &ShadowConfig) -> PixelBuffer {
        let mut tile = new_tile(config);
        render_tile(&mut tile, NeighborMask(bits), config);
        tile
    }

    #[test]
    fn test_all_edges_full_shadow_at_origin() {
        let config = ShadowConfig::default();
        let tile = tile_for(M::EDGES, &config);

        assert_eq!(tile.get(0, 0), [255, 255, 255, 255]);
        // Centre of the tile is beyond every spread
        assert_eq!(tile.get(64, 64)[3], 0);
    }

    #[test]
    fn test_west_edge_ramp() {
        let config = ShadowConfig::default();
        let tile = tile_for(M::WEST, &config);

        assert_eq!(tile.get(0, 50)[3], 255);
        assert_eq!(tile.get(12, 50)[3], encode_alpha(0.5));
        assert_eq!(tile.get(config.spread_side, 50)[3], 0);
        assert_eq!(tile.get(127, 50)[3], 0);
    }

    #[test]
    fn test_up_and_down_spreads_differ() {
        let config = ShadowConfig::default();
        let north = tile_for(M::NORTH, &config);
        let south = tile_for(M::SOUTH, &config);

        // 20 texels from the edge: past the up spread, inside the down spread
        assert_eq!(north.get(64, 20)[3], 0);
        assert!(south.get(64, 127 - 20)[3] > 0);
    }

    #[test]
    fn test_adjacent_edges_compound() {
        let config = ShadowConfig::default();
        let both = side_shadow(12, 8, NeighborMask(M::NORTH | M::WEST), &config);
        let west = side_shadow(12, 8, NeighborMask(M::WEST), &config);
        let north = side_shadow(12, 8, NeighborMask(M::NORTH), &config);

        assert!(both > west && both > north);
        assert!((both - 0.5f32.hypot(0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_corners_take_maximum_not_sum() {
        let config = ShadowConfig {
            tile_size: 16,
            spread_side: 16,
            spread_up: 16,
            spread_down: 16,
            ..Default::default()
        };
        let all = NeighborMask(M::CORNERS);
        for y in 0..16 {
            for x in 0..16 {
                let expected = [M::NORTH_WEST, M::NORTH_EAST, M::SOUTH_EAST, M::SOUTH_WEST]
                    .iter()
                    .map(|&c| corner_shadow(x, y, NeighborMask(c), &config))
                    .fold(0.0, f32::max);
                assert_eq!(corner_shadow(x, y, all, &config), expected);
            }
        }
    }

    #[test]
    fn test_passes_merge_by_maximum() {
        let config = ShadowConfig::default();
        // Corner and the far edge overlap along the south-west of the tile
        let mask = NeighborMask(M::NORTH_EAST | M::SOUTH);
        let field = render_shadow_field(mask, &config);
        for (x, y, &v) in field.iter() {
            let (x, y) = (x as u32, y as u32);
            let expected = side_shadow(x, y, mask, &config).max(corner_shadow(x, y, mask, &config));
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn test_north_west_mirrors_north_east() {
        let config = ShadowConfig::default();
        let nw = tile_for(M::NORTH_WEST, &config);
        let ne = tile_for(M::NORTH_EAST, &config);

        for y in 0..config.tile_size {
            for x in 0..config.tile_size {
                assert_eq!(nw.get(x, y), ne.get(flip(x, config.tile_size), y));
            }
        }
        assert_eq!(nw.get(0, 0)[3], 255);
    }

    #[test]
    fn test_render_tile_replaces_previous_contents() {
        let config = ShadowConfig::default();
        let mut tile = new_tile(&config);
        render_tile(&mut tile, NeighborMask(M::EDGES), &config);
        render_tile(&mut tile, NeighborMask(M::NORTH), &config);

        // West edge shadow from the first render must be gone
        assert_eq!(tile.get(0, 64)[3], 0);
        assert_eq!(tile.get(0, 0)[3], 255);
    }
}
