use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid banner '{name}': {reason}")]
    InvalidBanner { name: String, reason: String },

    #[error("Duplicate banner: {0}")]
    DuplicateBanner(String),

    #[error("Banner not found: {0}")]
    BannerNotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
