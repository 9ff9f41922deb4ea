//! Writing tiles, the atlas, and its manifest to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Serialize;

use crate::atlas::Atlas;
use crate::config::ShadowConfig;
use crate::error::{Result, ShadowAtlasError};
use crate::neighbors::NeighborMask;
use crate::pixel_buffer::PixelBuffer;

/// Formats whose encoders accept an 8-bit RGBA buffer as-is.
const RGBA8_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tga,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];

/// Raster encoder for one run. Build it once, before the first save.
pub struct ImageEncoder {
    extension: String,
    format: ImageFormat,
}

impl ImageEncoder {
    pub fn new(extension: &str) -> Result<Self> {
        let format = ImageFormat::from_extension(extension)
            .filter(|format| RGBA8_FORMATS.contains(format))
            .ok_or_else(|| ShadowAtlasError::UnsupportedFormat(extension.to_string()))?;

        Ok(Self {
            extension: extension.to_ascii_lowercase(),
            format,
        })
    }

    pub fn tile_path(&self, dir: &Path, slot: u8) -> PathBuf {
        dir.join(format!("shadow_{:03}.{}", slot, self.extension))
    }

    pub fn atlas_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("atlas.{}", self.extension))
    }

    /// Encode `buffer` upright and write it to `path`.
    pub fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<()> {
        buffer
            .to_rgba_image()
            .save_with_format(path, self.format)
            .map_err(|source| ShadowAtlasError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Description of the atlas layout for renderers.
#[derive(Debug, Serialize)]
pub struct AtlasManifest {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub tile_size: u32,
    pub spread_side: u32,
    pub spread_up: u32,
    pub spread_down: u32,
    pub tiles: Vec<ManifestTile>,
}

#[derive(Debug, Serialize)]
pub struct ManifestTile {
    pub slot: u8,
    pub mask: NeighborMask,
    pub flags: Vec<&'static str>,
    pub column: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// u0, v0, u1, v1 with (0, 0) at the top-left of the saved atlas
    pub uv: [f32; 4],
}

pub fn build_manifest(
    config: &ShadowConfig,
    atlas: &Atlas,
    assignments: &BTreeMap<u8, NeighborMask>,
) -> AtlasManifest {
    let (w, h) = (config.atlas_width as f32, config.atlas_height as f32);
    let tiles = assignments
        .iter()
        .map(|(&slot, &mask)| {
            let (column, row) = atlas.cell(slot);
            let rect = atlas.cell_rect(slot);
            ManifestTile {
                slot,
                mask,
                flags: mask.flag_names(),
                column,
                row,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                uv: [
                    rect.x as f32 / w,
                    rect.y as f32 / h,
                    (rect.x + rect.width) as f32 / w,
                    (rect.y + rect.height) as f32 / h,
                ],
            }
        })
        .collect();

    AtlasManifest {
        atlas_width: config.atlas_width,
        atlas_height: config.atlas_height,
        tile_size: config.tile_size,
        spread_side: config.spread_side,
        spread_up: config.spread_up,
        spread_down: config.spread_down,
        tiles,
    }
}

pub fn write_manifest(manifest: &AtlasManifest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json).map_err(|source| ShadowAtlasError::Io {
        path: path.to_path_buf(),
        source,
    })
}
