//! Shadow atlas generation library
//!
//! Procedurally renders the soft-shadow tiles used to darken the edges and
//! corners of tile map cells, and packs them into one texture atlas.

pub mod atlas;
pub mod config;
pub mod debug_tile;
pub mod error;
pub mod export;
pub mod falloff;
pub mod generator;
pub mod neighbors;
pub mod pixel_buffer;
pub mod shadow;
pub mod tilemap;
pub mod verify;
