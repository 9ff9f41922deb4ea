use std::fs;

use shadow_atlas::config::{RunOptions, ShadowConfig};
use shadow_atlas::error::ShadowAtlasError;
use shadow_atlas::generator;
use shadow_atlas::neighbors::{resolve, NeighborMask, SLOT_COUNT};

fn options_in(dir: &std::path::Path) -> RunOptions {
    RunOptions {
        output_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn full_run_writes_every_slot_and_the_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShadowConfig::default();

    let report = generator::run(&config, &options_in(dir.path())).unwrap();

    assert!(report.table.is_clean());
    assert!(report.failed.is_empty());
    assert_eq!(report.tiles_rendered, SLOT_COUNT);
    assert_eq!(report.written_tiles.len(), SLOT_COUNT);

    for slot in 0..SLOT_COUNT {
        assert!(dir.path().join(format!("shadow_{:03}.png", slot)).exists());
    }
    // The empty mask resolves to nothing and produces no file
    assert_eq!(resolve(NeighborMask(0)).slot(), None);
    assert!(!dir.path().join(format!("shadow_{:03}.png", SLOT_COUNT)).exists());

    let atlas = image::open(dir.path().join("atlas.png")).unwrap().to_rgba8();
    assert_eq!(atlas.dimensions(), (config.atlas_width, config.atlas_height));
}

#[test]
fn atlas_cells_match_tile_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShadowConfig::default();
    generator::run(&config, &options_in(dir.path())).unwrap();

    let atlas = image::open(dir.path().join("atlas.png")).unwrap().to_rgba8();
    let per_row = config.cells_per_row();

    for slot in [0u32, 14, 15, 30, 45] {
        let tile = image::open(dir.path().join(format!("shadow_{:03}.png", slot)))
            .unwrap()
            .to_rgba8();
        let (cx, cy) = ((slot % per_row) * config.tile_size, (slot / per_row) * config.tile_size);

        for (x, y, pixel) in tile.enumerate_pixels() {
            assert_eq!(atlas.get_pixel(cx + x, cy + y), pixel, "slot {} at ({}, {})", slot, x, y);
        }
    }
}

#[test]
fn all_edges_tile_is_dark_at_corner_and_clear_in_middle() {
    let dir = tempfile::tempdir().unwrap();
    generator::run(&ShadowConfig::default(), &options_in(dir.path())).unwrap();

    let slot = resolve(NeighborMask(0b0000_1111)).slot().unwrap();
    let tile = image::open(dir.path().join(format!("shadow_{:03}.png", slot)))
        .unwrap()
        .to_rgba8();

    assert_eq!(tile.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(tile.get_pixel(64, 64).0[3], 0);
    assert!(tile.pixels().all(|p| p.0[..3] == [255, 255, 255]));
}

#[test]
fn manifest_lists_every_slot() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        write_tiles: false,
        parallel: false,
        ..options_in(dir.path())
    };
    let report = generator::run(&ShadowConfig::default(), &options).unwrap();

    assert!(report.written_tiles.is_empty());
    assert!(!dir.path().join("shadow_000.png").exists());

    let text = fs::read_to_string(report.manifest_path.unwrap()).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&text).unwrap();
    let tiles = manifest["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), SLOT_COUNT);
    assert_eq!(tiles[0]["slot"], 0);
    assert_eq!(tiles[0]["mask"], NeighborMask::NORTH);
}

#[test]
fn unsupported_format_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        extension: "xyz".to_string(),
        ..options_in(dir.path())
    };

    assert!(generator::run(&ShadowConfig::default(), &options).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn encode_failures_are_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on a tile's file name makes that one save fail
    fs::create_dir(dir.path().join("shadow_003.png")).unwrap();

    let report = generator::run(&ShadowConfig::default(), &options_in(dir.path())).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.written_tiles.len(), SLOT_COUNT - 1);
    assert!(report.atlas_path.is_some());
}

#[test]
fn jpeg_output_is_refused_at_setup() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        extension: "jpg".to_string(),
        ..options_in(dir.path())
    };

    assert!(matches!(
        generator::run(&ShadowConfig::default(), &options),
        Err(ShadowAtlasError::UnsupportedFormat(_))
    ));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
