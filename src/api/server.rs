//! API Server - router construction and serve loop

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers;
use crate::llm::ChatModel;
use crate::usage::{QuotaPolicy, UsageLedger, UsageStore};

/// Application state shared by all handlers
pub struct AppState {
    pub store: UsageStore,
    pub ledger: UsageLedger,
    pub policy: QuotaPolicy,
    pub chat_model: Arc<dyn ChatModel>,
}

/// Build the router with all routes
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/usage", get(handlers::usage))
        .route("/upgrade", post(handlers::upgrade))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve the API
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
