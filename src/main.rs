use clap::Parser;
use dotenv::dotenv;
use log::{info, warn};
use smart_kitchen_backend::api::{self, AppState};
use smart_kitchen_backend::config::{AiProviderKind, AppConfig, ConfigError};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// AI provider used for recipe ideas: openai or gemini
    #[arg(long, env = "AI_PROVIDER", default_value = "openai")]
    provider: String,

    /// Upper bound for each upstream call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "8")]
    timeout_secs: u64,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let provider: AiProviderKind = args.provider.parse()?;
    let config = AppConfig::from_env(args.port, provider, Duration::from_secs(args.timeout_secs))?;

    run_api_server(config).await
}

async fn run_api_server(config: AppConfig) -> Result<(), AppError> {
    for key in config.missing_keys() {
        warn!("{} is not set; calls that need it will fall back", key);
    }

    info!(
        "Using {} ({}) for recipe ideas, upstream timeout {:?}",
        config.provider.kind, config.provider.model, config.upstream_timeout
    );

    let state = AppState::from_config(&config)?;
    let app = api::create_api(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Smart Kitchen backend listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
