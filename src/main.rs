use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use moviedb_api::app::app;
use moviedb_api::cli::{Cli, Commands};
use moviedb_api::config::AppConfig;
use moviedb_api::database::DatabaseManager;
use moviedb_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    tracing::info!("Starting moviedb-api in {:?} mode", config.environment);

    let database = DatabaseManager::connect_lazy(&config.database)?;

    match cli.command() {
        Commands::Migrate => {
            database.migrate().await?;
            database.close().await;
        }
        Commands::Serve => serve(config, database).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig, database: DatabaseManager) -> anyhow::Result<()> {
    let state = AppState::new(&config, database.clone());
    let router = app(state, config.security.cors_permissive);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
