//! Reading back written bundles

use crate::{ArchiveError, Result};
use banner_core::BundleFile;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

fn open(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|source| ArchiveError::Zip {
        path: path.to_path_buf(),
        source,
    })
}

/// Entry names of an archive, in archive order
pub fn inspect(path: &Path) -> Result<Vec<String>> {
    let mut archive = open(path)?;
    let mut names = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|source| ArchiveError::Zip {
            path: path.to_path_buf(),
            source,
        })?;
        names.push(entry.name().to_string());
    }

    Ok(names)
}

/// Check that an archive is a complete, self-contained banner bundle:
/// exactly the four bundle files at the root, and an index.html that
/// references every image shipped next to it.
pub fn verify_bundle(path: &Path) -> Result<Vec<String>> {
    let invalid = |reason: String| ArchiveError::InvalidBundle {
        path: path.to_path_buf(),
        reason,
    };

    let mut entries = inspect(path)?;
    entries.sort();
    let expected = BundleFile::sorted_names();
    if entries != expected {
        return Err(invalid(format!(
            "expected entries {:?}, found {:?}",
            expected, entries
        )));
    }

    let mut archive = open(path)?;
    let mut html = String::new();
    archive
        .by_name(BundleFile::Index.file_name())
        .map_err(|source| ArchiveError::Zip {
            path: path.to_path_buf(),
            source,
        })?
        .read_to_string(&mut html)
        .map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    for image in BundleFile::images() {
        if !html.contains(&format!("./{}", image.file_name())) {
            return Err(invalid(format!(
                "{} does not reference {}",
                BundleFile::Index.file_name(),
                image.file_name()
            )));
        }
    }
    if !html.contains(r#"<meta name="ad.size""#) {
        return Err(invalid("missing ad.size metadata".to_string()));
    }
    if let Some((width, height)) = size_from_file_name(path) {
        let expected = format!(r#"<meta name="ad.size" content="width={},height={}">"#, width, height);
        if !html.contains(&expected) {
            return Err(invalid(format!(
                "ad.size metadata does not match {}x{}",
                width, height
            )));
        }
    }

    Ok(entries)
}

/// `(w, h)` from an archive named `<prefix>_<w>x<h>.zip`
fn size_from_file_name(path: &Path) -> Option<(u32, u32)> {
    let stem = path.file_stem()?.to_str()?;
    let (_, size) = stem.rsplit_once('_')?;
    let (width, height) = size.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}
