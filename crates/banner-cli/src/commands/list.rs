use anyhow::Result;
use banner_config::LoadedConfig;

pub fn handle(loaded: &LoadedConfig) -> Result<()> {
    let config = &loaded.config;

    println!("Config: {}", loaded.origin);
    println!("Sources: {}", loaded.source_dir().display());
    println!("Output: {}", loaded.output_dir().display());

    if config.banners.is_empty() {
        println!("\nNo banners configured.");
        return Ok(());
    }

    println!("\nBanners ({}):", config.banners.len());
    for banner in &config.banners {
        println!("  {} ({})", banner.name, banner.size_name());
        println!(
            "    Cursor: {}x{}  Reveal: {}x{} (offset {}, {})",
            banner.cursor_width,
            banner.cursor_height,
            banner.reveal_width,
            banner.reveal_height,
            banner.reveal_offset_x,
            banner.reveal_offset_y
        );
        println!("    Archive: {}", banner.archive_name(&config.build.archive_prefix));
    }

    Ok(())
}
