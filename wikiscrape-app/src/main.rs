use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wikiscrape_api::{AppState, Credentials, build_router};
use wikiscrape_common::observability::init_logging;
use wikiscrape_config::{WikiscrapeConfig, WikiscrapeConfigLoader};
use wikiscrape_web::scrape_url;

mod wiring;

const DEFAULT_CONFIG_FILE: &str = "wikiscrape.yaml";

#[derive(Parser)]
#[command(name = "wikiscrape")]
#[command(about = "Wikipedia article extraction and question answering")]
struct Cli {
    /// YAML config file; `wikiscrape.yaml` is read if present when omitted
    #[arg(long, global = true, env = "WIKISCRAPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Override `server.bind`
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Extract one article and print it as JSON
    Scrape { url: String },

    /// Extract one article and answer a question about it
    Ask { url: String, question: String },
}

fn load_config(path: Option<&PathBuf>) -> Result<WikiscrapeConfig> {
    let loader = WikiscrapeConfigLoader::new();
    let loader = match path {
        Some(p) => loader.with_file(p),
        None => loader.with_optional_file(DEFAULT_CONFIG_FILE),
    };
    loader.load().context("failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = load_config(cli.config.as_ref())?;
    let log_path = init_logging(wiring::log_config(&cfg))?;
    tracing::debug!(log_path = %log_path.display(), "logging.ready");

    match cli.command {
        Commands::Serve { bind } => serve(cfg, bind).await,
        Commands::Scrape { url } => {
            let fetcher = wiring::build_fetcher(&cfg)?;
            let article = scrape_url(&fetcher, &url).await?;
            println!("{}", serde_json::to_string_pretty(&article)?);
            Ok(())
        }
        Commands::Ask { url, question } => {
            let fetcher = wiring::build_fetcher(&cfg)?;
            let qa = wiring::require_answerer(&cfg).await?;
            let article = scrape_url(&fetcher, &url).await?;
            let answer = qa.answer(&article.content, &question).await?;
            println!("{answer}");
            Ok(())
        }
    }
}

async fn serve(cfg: WikiscrapeConfig, bind: Option<SocketAddr>) -> Result<()> {
    cfg.validate().context("invalid server configuration")?;

    let fetcher = wiring::build_fetcher(&cfg)?;
    let qa = wiring::build_answerer(&cfg).await?;
    if qa.is_none() {
        tracing::warn!("no LLM configured; /ask will fail");
    }

    let state = AppState::new(
        Arc::new(fetcher),
        qa,
        Credentials::new(&cfg.auth.username, &cfg.auth.password),
    );
    let app = build_router(state);

    let addr = match bind {
        Some(addr) => addr,
        None => cfg.server.bind.parse().context("invalid server.bind")?,
    };
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "server.listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server.stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
