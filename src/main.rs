use std::path::PathBuf;
use std::process;

use clap::Parser;

use shadow_atlas::config::{RunOptions, ShadowConfig};
use shadow_atlas::generator;
use shadow_atlas::verify;

#[derive(Parser, Debug)]
#[command(name = "shadow_atlas")]
#[command(about = "Generate soft-shadow tiles for every neighbor mask and pack them into an atlas")]
struct Args {
    /// Directory for the tile images, the atlas and its manifest
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// JSON file overriding tile size, atlas size and spreads
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image format (file extension)
    #[arg(long, default_value = "png")]
    format: String,

    /// Fill tiles with flat palette colours to check atlas placement
    #[arg(long)]
    debug: bool,

    /// Only write the atlas, not one image per tile
    #[arg(long)]
    atlas_only: bool,

    /// Do not write atlas.json
    #[arg(long)]
    no_manifest: bool,

    /// Render tiles on a single thread
    #[arg(long)]
    sequential: bool,

    /// Check the neighbor table for conflicts and fallout, then exit
    #[arg(long)]
    verify_only: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.verify_only {
        let report = verify::verify_table();
        report.log_problems();
        log::info!(
            "{} slots assigned, {} invalid masks, {} conflicts, {} fallout",
            report.assignments.len(),
            report.invalid,
            report.conflicts.len(),
            report.fallout.len()
        );
        for (slot, mask) in &report.assignments {
            log::info!("  slot {:2} <- mask {}", slot, mask);
        }
        return;
    }

    let config = match &args.config {
        Some(path) => match ShadowConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        },
        None => ShadowConfig::default(),
    };

    let options = RunOptions {
        output_dir: args.output,
        extension: args.format,
        write_tiles: !args.atlas_only,
        debug_tiles: args.debug,
        write_manifest: !args.no_manifest,
        parallel: !args.sequential,
    };

    log::info!(
        "Tile {}px, atlas {}x{}, spreads side {} / up {} / down {}",
        config.tile_size,
        config.atlas_width,
        config.atlas_height,
        config.spread_side,
        config.spread_up,
        config.spread_down
    );

    match generator::run(&config, &options) {
        Ok(report) => {
            log::info!(
                "ALL done: {} tiles rendered, {} written, {} failures",
                report.tiles_rendered,
                report.written_tiles.len(),
                report.failed.len()
            );
        }
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
