use std::{net::SocketAddr, sync::Arc};

mod app;
mod auth;
mod comments;
mod config;
mod db;
mod envelope;
mod error;
mod records;
mod state;
#[cfg(test)]
mod testing;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mountain_accident=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let pool = db::connect(&config).await?;
    let app_state = AppState::from_pool(pool.clone(), config.clone());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let result = app::serve(app::build_app(app_state), addr, app::shutdown_signal()).await;

    pool.close().await;
    tracing::info!("database pool closed");
    result
}
