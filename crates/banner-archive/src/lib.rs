//! Archive layer for banner
//!
//! This crate provides:
//! - Flat, deterministic ZIP archives of a bundle directory
//! - Inspection and verification of written bundles

pub mod error;
pub mod verify;
pub mod writer;

pub use error::{ArchiveError, Result};
pub use verify::{inspect, verify_bundle};
pub use writer::{ArchiveSummary, Archiver};
