//! Shift scheduler HTTP server.
//!
//! Run with: cargo run
//! Then open: http://localhost:7860

use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use shift_scheduler_core::api;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("shift_scheduler_core=info".parse().unwrap()))
        .init();

    let state = Arc::new(api::AppState::new());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 7860));

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tracing::info!(%addr, "shift scheduler listening");
    axum::serve(listener, app).await.unwrap();
}
