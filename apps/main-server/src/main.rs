//! OneOnOne Main Server binary.

use main_server::{config::Config, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!(
        database_url = %config.database_url,
        "Starting OneOnOne Main Server"
    );

    run(config).await
}
