//! Image side of a banner build
//!
//! - [`SourceSet`] locates the three source images
//! - [`ImageBackend`] decodes, resizes and encodes; [`RustBackend`] is the
//!   production implementation on top of the `image` crate
//! - [`AssetPipeline`] turns a source set into the three bundle images for
//!   one banner

pub mod backend;
pub mod error;
pub mod pipeline;
pub mod source;

pub use backend::{Dimensions, ImageBackend, ImageJob, Operation, RustBackend};
pub use error::{AssetError, Result};
pub use pipeline::{AssetPipeline, ProcessedAsset};
pub use source::{SourceRole, SourceSet};
