//! # lumen-addons
//!
//! Addon discovery and loading for the Lumen installer.
//!
//! This crate provides:
//! - Addon discovery from the addons directory
//! - Addon archive validation and loading
//! - The addon load failure kind
//!
//! ## Addon Structure
//!
//! An addon is a single `.jar` archive dropped into the addons directory.
//! There is no manifest file: the archive's file stem is the addon's name,
//! and loading only validates that the archive is a readable, non-empty
//! zip container.

pub mod addon;
pub mod discovery;
pub mod error;

pub use addon::Addon;
pub use discovery::discover_addons;
pub use error::{AddonLoadError, AddonResult};
