//! Stanza CLI
//!
//! Loads, checks, and summarizes a poetry collection served as static files.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use stanza_cli::cli::{Args, Command};
use stanza_cli::{commands, config_handlers, logging};
use stanza_client::{Pipeline, StanzaConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config_path = args.config.as_deref();

    let command = match args.command {
        Command::Config { action } => {
            config_handlers::handle_config_command(config_path, action)?;
            return Ok(());
        }
        command => command,
    };

    let config = StanzaConfig::load(config_path).context("Failed to load configuration")?;
    let pipeline = Pipeline::from_config(&config).context("Failed to build pipeline")?;
    tracing::debug!(?pipeline, "Pipeline ready");

    let mut out = std::io::stdout().lock();
    match command {
        Command::Load { limit, json } => {
            commands::cmd_load(&pipeline, limit, json, &mut out).await?;
        }
        Command::Discover { json } => {
            commands::cmd_discover(&pipeline, json, &mut out).await?;
        }
        Command::Validate { limit } => {
            let clean = commands::cmd_validate(&pipeline, limit, &mut out).await?;
            if !clean {
                drop(out);
                std::process::exit(1);
            }
        }
        Command::Stats { json } => {
            commands::cmd_stats(&pipeline, json, &mut out).await?;
        }
        Command::Config { .. } => {}
    }

    Ok(())
}
