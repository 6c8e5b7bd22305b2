mod commands;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use pricecmp_core::AppConfig;
use pricecmp_scraper::TtlCache;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricecmp-cli")]
#[command(about = "Scrape and compare product pages across Indian marketplaces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Identify the marketplace and product id of a URL without fetching it
    Classify {
        /// Product page URL
        url: String,
    },
    /// Fetch and extract one or more product pages
    Scrape {
        /// Product page URLs (at most 10)
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { url } => commands::run_classify(&url)?,
        Commands::Scrape { urls } => {
            let config = pricecmp_core::load_app_config()?;
            init_tracing(&config)?;
            tracing::debug!(env = %config.env, "configuration loaded");

            let cache = Arc::new(TtlCache::new(config.cache_ttl()));
            let sweeper = cache.spawn_sweeper(config.cache_sweep_interval());
            let result = commands::run_scrape(&config, Arc::clone(&cache), &urls).await;
            sweeper.abort();
            result?;
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(config.env.ansi_logs())
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
