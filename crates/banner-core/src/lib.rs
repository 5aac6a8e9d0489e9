//! Core domain models and logic for banner
//!
//! This crate contains:
//! - Domain models (BannerConfig, Creative, BundleFile)
//! - Template renderer (per-banner index.html generation)

pub mod banner;
pub mod bundle;
pub mod error;
pub mod render;

pub use banner::{BannerConfig, Creative, ResizeFilter, validate_all};
pub use bundle::BundleFile;
pub use error::{Error, Result};
pub use render::TemplateRenderer;
