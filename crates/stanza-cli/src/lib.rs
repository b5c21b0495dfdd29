//! # stanza-cli
//!
//! Command-line interface for the Stanza content pipeline.
//!
//! This crate provides the `stanza` binary and its building blocks:
//! - Argument definitions ([`cli`])
//! - `load`, `discover`, `validate`, and `stats` handlers ([`commands`])
//! - `config path|get|set|init` handlers ([`config_handlers`])
//! - Subscriber setup ([`logging`])

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
