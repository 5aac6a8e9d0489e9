mod cli;
mod commands;

use anyhow::Result;
use banner_config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config_path = cli.config.clone();
    let resolve = || -> Result<banner_config::LoadedConfig> {
        let loaded = Config::resolve(config_path.as_deref())?;
        tracing::debug!("Config: {}", loaded.origin);
        Ok(loaded)
    };

    match cli.command {
        cli::Commands::Build {
            output,
            only,
            skip_failed,
            no_clean,
            json,
        } => commands::build::handle(resolve()?, output, only, skip_failed, no_clean, json).await,
        cli::Commands::Init { force } => commands::init::handle(force),
        cli::Commands::List => commands::list::handle(&resolve()?),
        cli::Commands::Render { banner, output } => {
            commands::render::handle(&resolve()?, &banner, output.as_deref()).await
        }
        cli::Commands::Verify { dir } => commands::verify::handle(&resolve()?, dir),
    }
}
