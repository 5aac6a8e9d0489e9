//! Directory to ZIP archiving

use crate::{ArchiveError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// A written archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Entry names in archive order
    pub entries: Vec<String>,
    pub size_bytes: u64,
    pub blake3: String,
}

/// Writes flat archives: every file under the source directory lands at the
/// archive root under its own file name.
#[derive(Debug, Clone, Copy)]
pub struct Archiver {
    compression: CompressionMethod,
}

impl Archiver {
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    fn entry_options(&self) -> SimpleFileOptions {
        // Fixed timestamp and permissions keep archives byte-identical across runs
        SimpleFileOptions::default()
            .compression_method(self.compression)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644)
    }

    /// Archive every regular file under `dir` into `dest`
    pub fn archive_dir(&self, dir: &Path, dest: &Path) -> Result<ArchiveSummary> {
        let files = collect_files(dir)?;
        self.archive_files(&files, dest)?;

        let bytes = std::fs::read(dest).map_err(|source| ArchiveError::Io {
            path: dest.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote {} ({} entries)", dest.display(), files.len());

        Ok(ArchiveSummary {
            path: dest.to_path_buf(),
            entries: files.into_keys().collect(),
            size_bytes: bytes.len() as u64,
            blake3: blake3::hash(&bytes).to_hex().to_string(),
        })
    }

    /// Write `files` (entry name to source path) into `dest`
    ///
    /// A partially written `dest` is removed on error.
    fn archive_files(&self, files: &BTreeMap<String, PathBuf>, dest: &Path) -> Result<()> {
        let file = File::create(dest).map_err(|source| ArchiveError::Io {
            path: dest.to_path_buf(),
            source,
        })?;

        let result = self.write_entries(ZipWriter::new(file), files, dest);
        if result.is_err()
            && let Err(e) = std::fs::remove_file(dest)
        {
            tracing::warn!("Could not remove partial archive {}: {}", dest.display(), e);
        }
        result
    }

    fn write_entries(
        &self,
        mut writer: ZipWriter<File>,
        files: &BTreeMap<String, PathBuf>,
        dest: &Path,
    ) -> Result<()> {
        let zip_err = |source| ArchiveError::Zip {
            path: dest.to_path_buf(),
            source,
        };

        for (name, path) in files {
            writer
                .start_file(name.as_str(), self.entry_options())
                .map_err(zip_err)?;
            let mut input = File::open(path).map_err(|source| ArchiveError::Io {
                path: path.clone(),
                source,
            })?;
            std::io::copy(&mut input, &mut writer).map_err(|source| ArchiveError::Io {
                path: path.clone(),
                source,
            })?;
        }
        writer.finish().map_err(zip_err)?;
        Ok(())
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular files under `dir`, keyed and sorted by flattened entry name
fn collect_files(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();

    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry.map_err(|source| ArchiveError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if files.insert(name.clone(), entry.into_path()).is_some() {
            return Err(ArchiveError::DuplicateEntry {
                name,
                dir: dir.to_path_buf(),
            });
        }
    }

    Ok(files)
}
