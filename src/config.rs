//! Design-time constants for a generation run.
//!
//! Every dimension is fixed for the duration of a run. The defaults reproduce
//! the classic 128px tile / 1024px atlas layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShadowAtlasError};
use crate::neighbors::SLOT_COUNT;

/// Tile and atlas geometry plus the falloff spreads (in texels).
///
/// `spread_up` and `spread_down` differ to bias the shadow as if lit from
/// above: north-facing geometry casts a shorter shadow than south-facing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Side length of a single square tile
    pub tile_size: u32,
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// Spread for the west and east edges
    pub spread_side: u32,
    /// Spread for the north edge and the north corners
    pub spread_up: u32,
    /// Spread for the south edge and the south corners
    pub spread_down: u32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            tile_size: 128,
            atlas_width: 1024,
            atlas_height: 1024,
            spread_side: 24,
            spread_up: 16,
            spread_down: 32,
        }
    }
}

impl ShadowConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ShadowAtlasError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| ShadowAtlasError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn cells_per_row(&self) -> u32 {
        self.atlas_width / self.tile_size
    }

    pub fn cells_per_column(&self) -> u32 {
        self.atlas_height / self.tile_size
    }

    /// Check that the constants can hold every slot the resolver produces.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(ShadowAtlasError::Config("tile_size must be non-zero".into()));
        }
        if self.spread_side == 0 || self.spread_up == 0 || self.spread_down == 0 {
            return Err(ShadowAtlasError::Config("spreads must be non-zero".into()));
        }
        if self.atlas_width % self.tile_size != 0 || self.atlas_height % self.tile_size != 0 {
            return Err(ShadowAtlasError::Config(format!(
                "atlas {}x{} is not a multiple of tile size {}",
                self.atlas_width, self.atlas_height, self.tile_size
            )));
        }
        let capacity = self.cells_per_row() as usize * self.cells_per_column() as usize;
        if capacity < SLOT_COUNT {
            return Err(ShadowAtlasError::Config(format!(
                "atlas holds {} cells but {} slots are required",
                capacity, SLOT_COUNT
            )));
        }
        Ok(())
    }
}

/// Options for where and how a run writes its output.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    /// File extension, also selects the encoder format
    pub extension: String,
    /// Write one image per slot in addition to the atlas
    pub write_tiles: bool,
    /// Fill tiles from the debug palette instead of rendering shadows
    pub debug_tiles: bool,
    pub write_manifest: bool,
    /// Render tiles on the rayon pool before packing
    pub parallel: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            extension: "png".to_string(),
            write_tiles: true,
            debug_tiles: false,
            write_manifest: true,
            parallel: true,
        }
    }
}
