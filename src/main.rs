use anyhow::Context;
use tracing::info;

use filmlist_api::database::manager::DatabaseManager;
use filmlist_api::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::config();
    info!("Starting filmlist-api in {:?} mode", config.environment);

    // The schema is created up front, before the listener starts accepting
    // connections.
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to run schema migration")?;

    let app = app(pool);

    // Allow tests or deployments to override port via env
    let port = std::env::var("FILMLIST_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("filmlist-api listening on http://{bind_addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
