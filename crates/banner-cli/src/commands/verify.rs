use anyhow::Result;
use banner_config::LoadedConfig;
use std::path::{Path, PathBuf};

pub fn handle(loaded: &LoadedConfig, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| loaded.output_dir());
    let archives = find_archives(&dir)?;

    if archives.is_empty() {
        anyhow::bail!("No archives found in {}", dir.display());
    }

    let mut failed = 0;
    for archive in &archives {
        match banner_archive::verify_bundle(archive) {
            Ok(entries) => println!("✓ {} ({})", archive.display(), entries.join(", ")),
            Err(e) => {
                failed += 1;
                println!("✗ {}", e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} archive(s) invalid", failed, archives.len());
    }

    Ok(())
}

/// `.zip` files directly inside `dir`, sorted
fn find_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_zip = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("zip"))
            .unwrap_or(false);
        if path.is_file() && is_zip {
            archives.push(path);
        }
    }

    archives.sort();
    Ok(archives)
}
