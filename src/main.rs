use color_eyre::eyre::Result;
use dotenv::dotenv;
use reservation_api::{build_storage, config::ApiConfig, init_tracing, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Connect storage, creating the schema when it is PostgreSQL
    let storage = build_storage(&config).await?;

    // Start API server
    start_server(config, storage).await?;

    Ok(())
}
