use std::sync::Arc;
use std::time::Duration;

use trend_feed::api::{self, AppState};
use trend_feed::config::Config;
use trend_feed::db::Repository;
use trend_feed::error::Result;
use trend_feed::services::Sweeper;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::load()?;

    let repo = Arc::new(Repository::new(&config.db_path).await?);
    tracing::info!("opened news store at {}", config.db_path);

    let sweeper = Sweeper::start(
        repo.clone(),
        Duration::from_secs(config.sweep_interval_minutes * 60),
        Duration::from_secs(config.retention_hours * 3600),
    );

    let app = api::router(AppState { repo });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("trend-feed listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.shutdown();
    tracing::info!("shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
