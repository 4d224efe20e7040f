use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use air_backfill::backfill::BackfillRunner;
use air_backfill::config::{Config, LogFormat};
use air_backfill::openweather::AirPollutionClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (fail-fast)
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,air_backfill=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        start = %config.start,
        end = %config.end,
        base_url = %config.api_base_url,
        "Configuration loaded"
    );
    if !config.has_api_key() {
        tracing::warn!("API_KEY is not set; history requests will be rejected");
    }

    // Connect to database (fail-fast)
    tracing::info!("Connecting to database...");
    let db = Database::connect(config.connect_options()).await?;
    tracing::info!("Database connection established");

    let client = AirPollutionClient::new(&config)?;

    let runner = BackfillRunner::new(config, db.clone(), client);
    let summary = runner.run().await?;
    if summary.failed > 0 {
        tracing::warn!(
            failed = summary.failed,
            windows = summary.windows,
            "Some windows were not stored"
        );
    }

    db.close().await?;
    tracing::info!("Database connection closed");
    Ok(())
}
