//! Error types for shadow atlas generation.

use std::path::PathBuf;

/// Errors produced while configuring or writing a shadow atlas run.
///
/// Resolver outcomes (invalid combinations, fallout) and slot conflicts are
/// not errors; they are reported through [`crate::verify::TableReport`].
#[derive(Debug, thiserror::Error)]
pub enum ShadowAtlasError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShadowAtlasError>;
