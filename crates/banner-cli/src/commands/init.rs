use anyhow::Result;
use banner_config::{Config, PROJECT_FILE};
use std::path::Path;

pub fn handle(force: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let path = write_default(&current_dir, force)?;

    println!("✓ Created {}", path.display());
    println!("  Put the source images in '{}'", Config::default().build.source_dir.display());
    println!("  Run 'banner build' to generate the bundles");

    Ok(())
}

fn write_default(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let path = dir.join(PROJECT_FILE);

    if path.exists() && !force {
        anyhow::bail!("{} already exists in {} (use --force to overwrite)", PROJECT_FILE, dir.display());
    }

    Config::default().save(&path)?;
    Ok(path)
}
