//! Error types for banner-archive

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArchiveError>;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("ZIP error on {path}: {source}")]
    Zip {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Two files flatten to the same entry '{name}' in {dir}")]
    DuplicateEntry { name: String, dir: PathBuf },

    #[error("Invalid bundle {path}: {reason}")]
    InvalidBundle { path: PathBuf, reason: String },
}
