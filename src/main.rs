//! Crossforge CLI - cross-compilation build orchestrator
//!
//! Entry point for the crossforge command-line application.

use anyhow::Result;
use clap::Parser;

use crossforge::cli::output::display_error;
use crossforge::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_level().into()),
        )
        .init();

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
