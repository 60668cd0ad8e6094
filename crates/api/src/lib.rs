mod auth;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use common::Result;
use engine::{EngineHandle, ForecastService};

/// Shared application state injected into every route handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
    pub engine: EngineHandle,
    /// Bearer token for the fetch/analyze routes. `None` leaves them open.
    pub api_token: Option<String>,
}

/// Assemble every route with CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    Router::new()
        .merge(routes::api_router(state.clone()))
        .merge(routes::health_router())
        .with_state(state)
        .layer(cors)
}

/// Build and run the Axum API server.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Forecast API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
