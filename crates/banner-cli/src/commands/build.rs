use anyhow::Result;
use banner_config::{FailurePolicy, LoadedConfig};
use banner_engine::Builder;
use std::path::PathBuf;

pub async fn handle(
    mut loaded: LoadedConfig,
    output: Option<PathBuf>,
    only: Vec<String>,
    skip_failed: bool,
    no_clean: bool,
    json: bool,
) -> Result<()> {
    apply_overrides(&mut loaded, output, skip_failed, no_clean);

    let report = Builder::new(loaded)?.only(only).build().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for built in &report.archives {
            println!("✓ {} ({})", built.archive.path.display(), built.size);
            for image in &built.images {
                println!("  {} {}x{}", image.file, image.width, image.height);
            }
            println!("  blake3: {}", built.archive.blake3);
        }
        for skipped in &report.skipped {
            println!("✗ {}: {}", skipped.banner, skipped.error);
        }
    }

    if !report.is_complete() {
        anyhow::bail!("{} banner(s) failed", report.skipped.len());
    }

    Ok(())
}

/// Command-line flags win over the config file
fn apply_overrides(
    loaded: &mut LoadedConfig,
    output: Option<PathBuf>,
    skip_failed: bool,
    no_clean: bool,
) {
    let build = &mut loaded.config.build;
    if let Some(output) = output {
        // Relative to the working directory, not the config root
        build.output_dir = std::env::current_dir()
            .map(|cwd| cwd.join(&output))
            .unwrap_or(output);
    }
    if skip_failed {
        build.on_error = FailurePolicy::Skip;
    }
    if no_clean {
        build.clean_output = false;
    }
}
