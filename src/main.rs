use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use offer_finder::fetcher::HttpFetcher;
use offer_finder::web::{create_router, AppState};
use offer_finder::{AppConfig, PriceFinder};

#[derive(Debug, Parser)]
#[command(name = "offer-finder", version, about = "Find vendor offers for a product search")]
struct Cli {
    /// Extra configuration file layered over config/*.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Run one search and print the result as JSON
    Find {
        search: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("offer_finder=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let fetcher = Arc::new(HttpFetcher::new(&config.scraper)?);
    let finder = Arc::new(PriceFinder::new(fetcher, &config)?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(finder, config).await,
        Command::Find { search, limit } => {
            let limit = limit.unwrap_or_else(|| finder.offer_limit());
            let result = finder.find_with_limit(&search, limit).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

async fn serve(finder: Arc<PriceFinder>, config: AppConfig) -> Result<()> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState { finder });

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
