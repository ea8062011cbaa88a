use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Play a landing-page deck in the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck file to play (shorthand for `run`)
    deck: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a deck
    Run {
        /// Deck file (marquee.toml in the current directory by default)
        deck: Option<PathBuf>,
    },
    /// Parse and validate a deck without playing it
    Check {
        /// Deck file to check
        deck: PathBuf,
    },
    /// Write a starter deck to get going
    Init {
        /// Target directory (current directory by default)
        dir: Option<PathBuf>,
    },
}

fn default_deck_path() -> PathBuf {
    PathBuf::from("marquee.toml")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so it can drive the log level
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { deck }) => {
            let deck = deck.or(cli.deck).unwrap_or_else(default_deck_path);
            commands::run::run(config, &deck).await
        }
        None => {
            let deck = cli.deck.unwrap_or_else(default_deck_path);
            commands::run::run(config, &deck).await
        }
        Some(Commands::Check { deck }) => commands::check::run(&deck),
        Some(Commands::Init { dir }) => {
            commands::init::run(dir.unwrap_or_else(|| PathBuf::from(".")).as_path())
        }
    }
}
