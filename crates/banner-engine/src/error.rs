use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] banner_config::ConfigError),

    #[error(transparent)]
    Core(#[from] banner_core::Error),

    #[error(transparent)]
    Assets(#[from] banner_assets::AssetError),

    #[error(transparent)]
    Archive(#[from] banner_archive::ArchiveError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Refusing to clean {0}: it contains the source images")]
    UnsafeOutput(PathBuf),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Banner '{banner}' failed: {source}")]
    Banner {
        banner: String,
        source: Box<BuildError>,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BuildError::Io { path, source }
    }
}
