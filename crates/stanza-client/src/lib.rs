//! # stanza-client
//!
//! Runs the Stanza content resolution pipeline against a static file store
//! over HTTP.
//!
//! This crate provides:
//! - Configuration loading ([`StanzaConfig`])
//! - Environment-aware URL building ([`EnvironmentResolver`])
//! - Store access behind the [`ContentStore`] trait
//! - Remote discovery with a static fallback ([`DiscoveryService`])
//! - Companion image probing ([`AssetResolver`])
//! - The orchestrator itself ([`Pipeline`])
//!
//! # Example
//!
//! ```rust,no_run
//! use stanza_client::{Pipeline, StanzaConfig};
//!
//! # async fn example() -> stanza_client::Result<()> {
//! let config = StanzaConfig::load(None)?;
//! let pipeline = Pipeline::from_config(&config)?;
//! for record in pipeline.run(Some(10)).await {
//!     println!("{}: {}", record.identity(), record.title());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod memory;
pub mod pipeline;
pub mod store;

pub use assets::AssetResolver;
pub use config::{Layout, StanzaConfig};
pub use discovery::{Discovery, DiscoveryService, DiscoverySource, DiscoveryStrategy};
pub use environment::{EnvironmentResolver, OriginProvider, OriginSource};
pub use error::{Error, Result};
pub use memory::{MemoryListing, MemoryStore};
pub use pipeline::{Pipeline, RunReport, RunSummary};
pub use store::{ContentStore, HttpStore};
