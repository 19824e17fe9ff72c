//! Manifest data structures
//!
//! - [`manifest`]: `envstrap.yaml` loading, defaults and validation
//! - [`tier`]: dependency tiers and package specifications

pub mod manifest;
pub mod tier;


pub use manifest::{MANIFEST_FILE, Manifest};
pub use tier::{DependencyTier, PackageSpec};
