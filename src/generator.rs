//! The generation batch: resolve every mask, render, pack, write.
//!
//! Tiles are independent, so rendering may run on the rayon pool; packing
//! and writing always happen afterwards on the calling thread, in ascending
//! mask order, so a conflicting slot is deterministically owned by the
//! later mask.

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::atlas::Atlas;
use crate::config::{RunOptions, ShadowConfig};
use crate::debug_tile::fill_debug_tile;
use crate::error::{Result, ShadowAtlasError};
use crate::export::{build_manifest, write_manifest, ImageEncoder};
use crate::neighbors::{resolve, NeighborMask};
use crate::pixel_buffer::PixelBuffer;
use crate::shadow::{new_tile, render_tile};
use crate::verify::{verify_table, TableReport};

/// One tile to render: a mask and the slot it resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileJob {
    pub slot: u8,
    pub mask: NeighborMask,
}

/// Every mask that resolves to a slot, in ascending mask order.
/// Conflicting masks are all included.
pub fn tile_jobs() -> Vec<TileJob> {
    NeighborMask::all()
        .filter_map(|mask| resolve(mask).slot().map(|slot| TileJob { slot, mask }))
        .collect()
}

fn render_job(tile: &mut PixelBuffer, job: &TileJob, config: &ShadowConfig, debug: bool) {
    if debug {
        fill_debug_tile(tile, job.slot);
    } else {
        render_tile(tile, job.mask, config);
    }
}

/// Render `jobs` and hand each finished tile to `sink` in job order.
fn render_jobs<F>(
    jobs: &[TileJob],
    config: &ShadowConfig,
    debug: bool,
    parallel: bool,
    mut sink: F,
) where
    F: FnMut(&TileJob, &PixelBuffer),
{
    if parallel {
        let tiles: Vec<PixelBuffer> = jobs
            .par_iter()
            .map(|job| {
                let mut tile = new_tile(config);
                render_job(&mut tile, job, config, debug);
                tile
            })
            .collect();

        for (job, tile) in jobs.iter().zip(&tiles) {
            sink(job, tile);
        }
    } else {
        let mut tile = new_tile(config);
        for job in jobs {
            render_job(&mut tile, job, config, debug);
            sink(job, &tile);
        }
    }
}

/// Build the atlas in memory without touching the filesystem.
pub fn build_atlas(
    config: &ShadowConfig,
    debug: bool,
    parallel: bool,
) -> Result<(Atlas, TableReport)> {
    config.validate()?;

    let table = verify_table();
    let mut atlas = Atlas::new(config);
    render_jobs(&tile_jobs(), config, debug, parallel, |job, tile| {
        atlas.place_tile(tile, job.slot);
    });

    Ok((atlas, table))
}

/// A tile or output file that could not be written.
#[derive(Clone, Debug)]
pub struct FailedOutput {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub table: TableReport,
    pub tiles_rendered: usize,
    pub written_tiles: Vec<PathBuf>,
    pub failed: Vec<FailedOutput>,
    pub atlas_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
}

/// Run the full batch into `options.output_dir`.
///
/// Only setup problems (bad config, unknown format, unusable output
/// directory) are returned as errors. Per-file encode failures are logged,
/// recorded in the report, and the batch carries on.
pub fn run(config: &ShadowConfig, options: &RunOptions) -> Result<GenerationReport> {
    config.validate()?;
    let encoder = ImageEncoder::new(&options.extension)?;
    fs::create_dir_all(&options.output_dir).map_err(|source| ShadowAtlasError::Io {
        path: options.output_dir.clone(),
        source,
    })?;

    let table = verify_table();
    table.log_problems();

    let jobs = tile_jobs();
    let mut atlas = Atlas::new(config);
    let mut written_tiles = Vec::new();
    let mut failed = Vec::new();

    render_jobs(&jobs, config, options.debug_tiles, options.parallel, |job, tile| {
        atlas.place_tile(tile, job.slot);

        if !options.write_tiles {
            log::debug!("Packed slot {} from mask {}", job.slot, job.mask);
            return;
        }

        let path = encoder.tile_path(&options.output_dir, job.slot);
        match encoder.save(tile, &path) {
            Ok(()) => {
                log::info!("{}... done (mask {})", path.display(), job.mask);
                written_tiles.push(path);
            }
            Err(e) => {
                log::error!("{}", e);
                failed.push(FailedOutput {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    });

    let path = encoder.atlas_path(&options.output_dir);
    let atlas_path = match encoder.save(atlas.buffer(), &path) {
        Ok(()) => {
            log::info!("Wrote atlas {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::error!("{}", e);
            failed.push(FailedOutput {
                path,
                reason: e.to_string(),
            });
            None
        }
    };

    let manifest_path = if options.write_manifest {
        let path = options.output_dir.join("atlas.json");
        let manifest = build_manifest(config, &atlas, &table.assignments);
        match write_manifest(&manifest, &path) {
            Ok(()) => Some(path),
            Err(e) => {
                log::error!("{}", e);
                failed.push(FailedOutput {
                    path,
                    reason: e.to_string(),
                });
                None
            }
        }
    } else {
        None
    };

    Ok(GenerationReport {
        table,
        tiles_rendered: jobs.len(),
        written_tiles,
        failed,
        atlas_path,
        manifest_path,
    })
}
