use anyhow::Result;
use srg_market_history::{config::Config, services::ApiService};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🔧 Starting API service...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let api_service = ApiService::new(config)?;
    api_service.start().await?;

    Ok(())
}
