//! Wayfinder CLI
//!
//! Ask about the weather or your document; the assistant routes the
//! question and answers from the matching context.

use clap::Parser;
use wayfinder_core::{Config, WayfinderError};

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<WayfinderError>()
            .map(|w| w.exit_code())
            .unwrap_or(wayfinder_core::error::exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Chat(args) => commands::chat::run(args, &config).await,
        Commands::Ask(args) => commands::ask::run(args, &config).await,
        Commands::Status(args) => commands::status::run(args, &config).await,
    }
}
