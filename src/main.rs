use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cryptoverse::{api::CoinGeckoClient, config::Config, ui::App, ui::Route};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "cryptoverse")]
#[command(about = "Browse cryptocurrency prices, charts and comparisons in the terminal")]
struct Cli {
    /// Configuration file (defaults to config/default.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Top coins by market cap
    Home,
    /// Full sortable market listing
    Coins,
    /// Details and chart for one coin
    Coin {
        /// Provider id, e.g. "bitcoin"
        id: String,
    },
    /// Compare price history of several coins
    Compare {
        /// Provider ids; the configured selection is used when empty
        ids: Vec<String>,
    },
    /// Search coins by name or symbol
    Search {
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Initialize logging (to file, not terminal since we use TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .with_context(|| format!("Failed to open log file {}", config.logging.file))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cryptoverse=info")),
        )
        .init();

    tracing::info!("Starting Cryptoverse against {}", config.api.base_url);

    let client = CoinGeckoClient::from_config(&config.api)?;

    let (route, compare_ids) = match cli.command {
        None | Some(Commands::Home) => (Route::Home, Vec::new()),
        Some(Commands::Coins) => (Route::Coins, Vec::new()),
        Some(Commands::Coin { id }) => (Route::Coin(id), Vec::new()),
        Some(Commands::Compare { ids }) => (Route::Compare, ids),
        Some(Commands::Search { query }) => (Route::Search(query), Vec::new()),
    };

    // Run the application
    let mut app = App::new(config, Arc::new(client), route).compare_with(compare_ids);
    app.run().await?;

    Ok(())
}
