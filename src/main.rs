use std::sync::Arc;

use auth_realms_api::{
    service::config::{ConfigService, ConfigServiceImpl},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!("auth-realms-api: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config: Arc<dyn ConfigService> = Arc::new(ConfigServiceImpl::new());
    let bind_addr = format!("0.0.0.0:{}", config.port());

    let state = AppState::new(config).await?;
    let app = auth_realms_api::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| format!("failed to bind to {}: {}", bind_addr, err))?;
    tracing::info!("listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
