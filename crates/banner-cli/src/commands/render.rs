use anyhow::Result;
use banner_config::LoadedConfig;
use banner_core::TemplateRenderer;
use std::path::Path;

pub async fn handle(loaded: &LoadedConfig, banner: &str, output: Option<&Path>) -> Result<()> {
    let banner = loaded.banner(banner)?;
    let html = TemplateRenderer::new()?.render(banner, &loaded.config.creative)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, html).await?;
            println!("✓ Wrote {} ({})", path.display(), banner.size_name());
        }
        None => print!("{}", html),
    }

    Ok(())
}
