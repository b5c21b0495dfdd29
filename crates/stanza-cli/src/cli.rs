//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Stanza - load, check, and summarize a poetry collection
#[derive(Parser, Debug)]
#[command(name = "stanza")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (overrides `STANZA_CONFIG`)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the pipeline and print the records
    Load {
        /// Process at most this many discovered items
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the discovered content locators
    Discover {
        /// Print locators as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check records for missing metadata, empty bodies, and missing images
    Validate {
        /// Process at most this many discovered items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Summarize the collection by language, form, length, and author
    Stats {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration file operations
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `site.origin`
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target path instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
