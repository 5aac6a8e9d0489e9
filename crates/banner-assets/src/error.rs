//! Error types for banner-assets

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssetError>;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Source directory not found: {0}")]
    SourceDirMissing(PathBuf),

    #[error("Missing {role} source image: {path}")]
    SourceMissing { role: String, path: PathBuf },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
