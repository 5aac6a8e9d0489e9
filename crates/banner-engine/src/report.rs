//! Outcome of a build run

use banner_archive::ArchiveSummary;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub archives: Vec<BuiltBanner>,
    pub skipped: Vec<SkippedBanner>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuiltBanner {
    pub banner: String,
    pub size: String,
    pub images: Vec<BuiltImage>,
    #[serde(flatten)]
    pub archive: ArchiveSummary,
}

/// An image as written into the bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltImage {
    pub file: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedBanner {
    pub banner: String,
    pub error: String,
}

impl BuildReport {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            archives: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
