use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use scribe_configuration::ServerConfig;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::{error_mapper, HttpError};
pub use extract::ValidatedJson;
pub use handlers::*;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Downloaded WAV payloads can be large; raise the route body limit.
    let transcribe_route = post(transcribe_audio).layer(DefaultBodyLimit::max(64 * 1024 * 1024));

    Router::new()
        .route("/health", get(health_check))
        .route("/transcribe", transcribe_route)
        .with_state(state)
}

pub async fn create_app_routes(state: AppState, config: ServerConfig) -> anyhow::Result<()> {
    let app = build_router(state);
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
