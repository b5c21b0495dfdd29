//! Utility modules for identity computation, site-path handling, and
//! config file resolution.
//!
//! # Modules
//!
//! - [`ids`]: Container identity and numeric ordering
//! - [`paths`]: Site-relative path joining
//! - [`resolver`]: Config file location

pub mod ids;
pub mod paths;
pub mod resolver;
