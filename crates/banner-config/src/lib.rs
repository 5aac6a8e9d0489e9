//! Build configuration (banner.toml)
//!
//! Resolution order: an explicit `--config` path, then `banner.toml` found by
//! walking up from the working directory, then the user config file, then the
//! built-in defaults. Relative paths inside a config file resolve against the
//! directory holding that file; the user config and the defaults resolve
//! against the working directory.

use banner_core::{BannerConfig, Creative, ResizeFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up when walking up from the working directory
pub const PROJECT_FILE: &str = "banner.toml";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] banner_core::Error),
}

// ============================================================================
// Config (banner.toml)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default)]
    pub sources: SourceNames,

    #[serde(default)]
    pub creative: Creative,

    #[serde(default = "BannerConfig::defaults")]
    pub banners: Vec<BannerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_archive_prefix")]
    pub archive_prefix: String,

    /// Remove and recreate the output directory before building
    #[serde(default = "default_true")]
    pub clean_output: bool,

    #[serde(default)]
    pub on_error: FailurePolicy,

    #[serde(default)]
    pub filter: ResizeFilter,
}

/// File names of the three source images inside `source_dir`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceNames {
    #[serde(default = "default_normal")]
    pub normal: String,

    #[serde(default = "default_thermal")]
    pub thermal: String,

    #[serde(default = "default_camera")]
    pub camera: String,
}

/// What a build does when one banner fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run at the first error
    #[default]
    Abort,
    /// Record the error and continue with the next banner
    Skip,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build: BuildSettings::default(),
            sources: SourceNames::default(),
            creative: Creative::default(),
            banners: BannerConfig::defaults(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            archive_prefix: default_archive_prefix(),
            clean_output: true,
            on_error: FailurePolicy::default(),
            filter: ResizeFilter::default(),
        }
    }
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            normal: default_normal(),
            thermal: default_thermal(),
            camera: default_camera(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("source_images")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output_banners_png_standard")
}

fn default_archive_prefix() -> String {
    "FLIR_Standard_PNG".to_string()
}

fn default_true() -> bool {
    true
}

fn default_normal() -> String {
    "normal_highres.webp".to_string()
}

fn default_thermal() -> String {
    "thermal_highres.webp".to_string()
}

fn default_camera() -> String {
    "camara.webp".to_string()
}

impl Config {
    /// Parse and validate a config document
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        banner_core::validate_all(&self.banners)?;
        if self.build.archive_prefix.trim().is_empty() {
            return Err(banner_core::Error::InvalidBanner {
                name: "*".to_string(),
                reason: "archive_prefix must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve config starting from the current directory
    pub fn resolve(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let current = std::env::current_dir().map_err(|source| ConfigError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        Self::resolve_with(explicit, &current, Self::user_config_path())
    }

    /// Resolve config from an explicit start directory and user config path
    pub fn resolve_with(
        explicit: Option<&Path>,
        start: &Path,
        user_config: Option<PathBuf>,
    ) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                start.join(path)
            };
            let config = Self::load(&path)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start.to_path_buf());
            return Ok(LoadedConfig {
                root,
                origin: ConfigOrigin::Explicit(path),
                config,
            });
        }

        if let Some(root) = Self::find_project_root_from(start) {
            let path = root.join(PROJECT_FILE);
            tracing::debug!("Using project config {}", path.display());
            let config = Self::load(&path)?;
            return Ok(LoadedConfig {
                root,
                origin: ConfigOrigin::Project(path),
                config,
            });
        }

        if let Some(path) = user_config.filter(|p| p.exists()) {
            tracing::debug!("Using user config {}", path.display());
            let config = Self::load(&path)?;
            return Ok(LoadedConfig {
                root: start.to_path_buf(),
                origin: ConfigOrigin::User(path),
                config,
            });
        }

        Ok(LoadedConfig {
            root: start.to_path_buf(),
            origin: ConfigOrigin::Defaults,
            config: Config::default(),
        })
    }

    /// Find banner.toml by walking up from given directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "banner", "banner")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

// ============================================================================
// Resolved config
// ============================================================================

/// Where a resolved config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigOrigin::Explicit(path) | ConfigOrigin::Project(path) | ConfigOrigin::User(path) => {
                write!(f, "{}", path.display())
            }
            ConfigOrigin::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// A config together with the directory its relative paths resolve against
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub root: PathBuf,
    pub origin: ConfigOrigin,
    pub config: Config,
}

impl LoadedConfig {
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.source_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.output_dir)
    }

    pub fn banner(&self, name: &str) -> banner_core::Result<&BannerConfig> {
        self.config
            .banners
            .iter()
            .find(|b| b.name == name || b.size_name() == name)
            .ok_or_else(|| banner_core::Error::BannerNotFound(name.to_string()))
    }
}
