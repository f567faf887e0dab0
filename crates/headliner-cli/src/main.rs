use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use headliner_core::{AppConfig, Session};

mod commands;

#[derive(Parser)]
#[command(name = "headliner")]
#[command(author, version, about = "Top headlines in the terminal, with offline bookmarks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and show the current top headlines
    Headlines {
        /// Save the headline at this position (1-based)
        #[arg(short = 's', long)]
        save: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved articles
    Saved {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved article
    Delete {
        /// Id of the saved article
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Open a saved article in the browser
    Open {
        /// Id of the saved article
        id: Uuid,
    },
    /// Print a saved article's title and link for sharing
    Share {
        /// Id of the saved article
        id: Uuid,
    },
    /// Show or update configuration
    Config {
        /// News API key
        #[arg(long)]
        api_key: Option<String>,
        /// Two-letter country code for headlines
        #[arg(long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let command = cli.command.unwrap_or(Commands::Headlines {
        save: None,
        json: false,
    });

    match command {
        Commands::Config { api_key, country } => {
            commands::configure::run(&config, api_key, country)
        }
        Commands::Headlines { save, json } => {
            commands::headlines::run(&Session::open(&config).await?, save, json).await
        }
        Commands::Saved { json } => {
            commands::saved::run(&Session::open(&config).await?, json).await
        }
        Commands::Delete { id, yes } => {
            commands::delete::run(&Session::open(&config).await?, id, yes).await
        }
        Commands::Open { id } => commands::open::run(&Session::open(&config).await?, id).await,
        Commands::Share { id } => commands::share::run(&Session::open(&config).await?, id).await,
    }
}
