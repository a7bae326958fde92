use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coverdeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "coverdeck")]
#[command(author, version, about = "Terminal cover-art carousel with dominant-color theming")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory of cover images (shorthand for `run --covers-dir`)
    #[arg(short = 'd', long = "covers-dir")]
    covers_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the carousel TUI
    Run {
        /// Directory of cover images (overrides the configured directory)
        #[arg(short = 'd', long)]
        covers_dir: Option<PathBuf>,
    },
    /// Print the extracted color of a single image
    Color {
        /// Path to the image file
        image: PathBuf,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Some(Commands::Run { covers_dir }) => {
            commands::run::run(config, covers_dir.or(cli.covers_dir)).await
        }
        None => commands::run::run(config, cli.covers_dir).await,
        Some(Commands::Color { image }) => commands::color::run(&config, &image),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}
