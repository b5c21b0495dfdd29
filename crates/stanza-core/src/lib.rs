//! Stanza Core — shared errors, locators, and utilities.
//!
//! This crate provides the foundational types used across all Stanza crates.
//! It has no internal Stanza dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`locator`]: Content locators produced by discovery
//! - [`util`]: Identity, site-path, and config-path utilities

#![forbid(unsafe_code)]

pub mod error;
pub mod locator;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use locator::ContentLocator;

// Convenience re-exports from util
pub use util::ids::{compare_numeric, container_identity};
pub use util::paths::{join_site_path, strip_extension};
pub use util::resolver::ConfigPathResolver;
