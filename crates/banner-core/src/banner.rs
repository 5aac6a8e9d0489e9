//! Banner domain model

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One banner size plus the cursor and reveal geometry drawn inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub cursor_width: u32,
    pub cursor_height: u32,
    pub reveal_width: u32,
    pub reveal_height: u32,
    #[serde(default)]
    pub reveal_offset_x: i32,
    #[serde(default = "default_reveal_offset_y")]
    pub reveal_offset_y: i32,
}

fn default_reveal_offset_y() -> i32 {
    2
}

impl BannerConfig {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cursor_width: 180,
            cursor_height: 135,
            reveal_width: 108,
            reveal_height: 78,
            reveal_offset_x: 0,
            reveal_offset_y: default_reveal_offset_y(),
        }
    }

    pub fn with_cursor(mut self, width: u32, height: u32) -> Self {
        self.cursor_width = width;
        self.cursor_height = height;
        self
    }

    pub fn with_reveal(mut self, width: u32, height: u32) -> Self {
        self.reveal_width = width;
        self.reveal_height = height;
        self
    }

    /// `<width>x<height>`, used in archive and temp directory names
    pub fn size_name(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    pub fn archive_name(&self, prefix: &str) -> String {
        format!("{}_{}.zip", prefix, self.size_name())
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidBanner {
                name: self.size_name(),
                reason: "name must not be empty".to_string(),
            });
        }

        let dimensions = [
            ("width", self.width),
            ("height", self.height),
            ("cursor_width", self.cursor_width),
            ("cursor_height", self.cursor_height),
            ("reveal_width", self.reveal_width),
            ("reveal_height", self.reveal_height),
        ];
        if let Some((field, _)) = dimensions.iter().find(|(_, value)| *value == 0) {
            return Err(Error::InvalidBanner {
                name: self.name.clone(),
                reason: format!("{} must be greater than zero", field),
            });
        }

        Ok(())
    }

    /// The two banners the creative ships with: portrait and landscape
    pub fn defaults() -> Vec<Self> {
        vec![
            BannerConfig::new("portrait", 320, 480),
            BannerConfig::new("landscape", 480, 320),
        ]
    }
}

/// Validate a banner list: every entry valid, names and sizes unique
pub fn validate_all(banners: &[BannerConfig]) -> Result<()> {
    let mut names = HashSet::new();
    let mut sizes = HashSet::new();

    for banner in banners {
        banner.validate()?;
        if !names.insert(banner.name.as_str()) {
            return Err(Error::DuplicateBanner(banner.name.clone()));
        }
        // Same size means same archive name
        if !sizes.insert(banner.size_name()) {
            return Err(Error::DuplicateBanner(banner.size_name()));
        }
    }

    Ok(())
}

/// Copy and click-through target shared by every banner of a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creative {
    #[serde(default = "default_clickthrough_url")]
    pub clickthrough_url: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_cta_label")]
    pub cta_label: String,

    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for Creative {
    fn default() -> Self {
        Self {
            clickthrough_url: default_clickthrough_url(),
            title: default_title(),
            cta_label: default_cta_label(),
            lang: default_lang(),
        }
    }
}

fn default_clickthrough_url() -> String {
    "https://www.colvinycia.cl".to_string()
}

fn default_title() -> String {
    "Visor Térmico FLIR".to_string()
}

fn default_cta_label() -> String {
    "Ver Cámaras FLIR".to_string()
}

fn default_lang() -> String {
    "es".to_string()
}

/// Resampling filter used when resizing the background layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}
