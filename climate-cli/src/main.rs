//! Binary crate for the `climate` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_core=info,climate_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout).with_target(false))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
