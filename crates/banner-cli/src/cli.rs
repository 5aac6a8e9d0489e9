use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "banner")]
#[command(about = "Build interactive HTML5 banner bundles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: banner.toml found from the current directory up)
    #[arg(long, global = true, env = "BANNER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build one ZIP bundle per configured banner
    Build {
        /// Output directory (overrides build.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only build these banners (name or WIDTHxHEIGHT)
        #[arg(long)]
        only: Vec<String>,

        /// Keep going when a banner fails
        #[arg(long)]
        skip_failed: bool,

        /// Keep existing files in the output directory
        #[arg(long)]
        no_clean: bool,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default banner.toml in the current directory
    Init {
        /// Overwrite an existing banner.toml
        #[arg(long)]
        force: bool,
    },

    /// List configured banners
    List,

    /// Render index.html for one banner
    Render {
        /// Banner name or WIDTHxHEIGHT
        banner: String,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check the archives in an output directory
    Verify {
        /// Directory to check (default: build.output_dir)
        dir: Option<PathBuf>,
    },
}
