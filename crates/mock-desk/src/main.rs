//! Serve the mock desk services for local development.
//!
//! `deskpull-fetch` defaults its endpoint flags to this process, so a
//! full remote pull can be exercised with no real credentials.

use mock_desk::{router, DeskState};
use tracing::info;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_DESK_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4500);

    let state = DeskState::new();
    info!(
        client_id = %state.client_id(),
        rest_api_key = %state.rest_api_key(),
        "mock desk accepting demo credentials"
    );

    let app = router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "mock desk listening");
    axum::serve(listener, app).await.expect("server error");
}
