//! Continuous shadow falloff curves.
//!
//! Distances are in texels, measured from 0 at the occluding edge or corner.
//! A value of 1 is full shadow, 0 is fully lit.

/// Mirror a texel coordinate so one formula serves opposite edges.
#[inline]
pub fn flip(n: u32, size: u32) -> u32 {
    (size - 1) - n
}

/// Linear ramp from 1 at the edge down to 0 at `spread`.
#[inline]
pub fn edge_falloff(distance: u32, spread: u32) -> f32 {
    if distance >= spread {
        return 0.0;
    }

    1.0 - distance as f32 / spread as f32
}

/// Rounded falloff around a corner.
///
/// Each axis contributes its proximity `1 - edge_falloff`, and the result is
/// one minus their Euclidean norm, so the iso-lines are elliptical arcs
/// instead of the square-ish contours of a product of two ramps.
pub fn corner_falloff(x: u32, y: u32, spread_y: u32, spread_x: u32) -> f32 {
    if x > spread_x || y > spread_y {
        return 0.0;
    }

    let sx = 1.0 - edge_falloff(x, spread_x);
    let sy = 1.0 - edge_falloff(y, spread_y);

    1.0 - (sx * sx + sy * sy).sqrt().min(1.0)
}
