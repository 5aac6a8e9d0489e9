//! Source image discovery

use crate::{AssetError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which of the three source images a file plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    Normal,
    Thermal,
    Camera,
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceRole::Normal => "normal",
            SourceRole::Thermal => "thermal",
            SourceRole::Camera => "camera",
        };
        f.write_str(name)
    }
}

/// Resolved paths of the three source images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub normal: PathBuf,
    pub thermal: PathBuf,
    pub camera: PathBuf,
}

impl SourceSet {
    /// Resolve and check the three source images inside `dir`
    pub fn locate(dir: &Path, normal: &str, thermal: &str, camera: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(AssetError::SourceDirMissing(dir.to_path_buf()));
        }

        let set = Self {
            normal: dir.join(normal),
            thermal: dir.join(thermal),
            camera: dir.join(camera),
        };

        for (role, path) in set.iter() {
            if !path.is_file() {
                return Err(AssetError::SourceMissing {
                    role: role.to_string(),
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceRole, &Path)> {
        [
            (SourceRole::Normal, self.normal.as_path()),
            (SourceRole::Thermal, self.thermal.as_path()),
            (SourceRole::Camera, self.camera.as_path()),
        ]
        .into_iter()
    }
}
