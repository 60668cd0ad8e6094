use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::{auth::require_auth, AppState};

pub fn api_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/v1/fetchdata", get(fetch_data))
        .route("/api/v1/analyzeData", get(analyze_data))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/api/v1/test", get(test))
        .merge(protected)
}

async fn test() -> &'static str {
    "hello user, you are logged in"
}

/// Fetch every watched ticker into the cache.
async fn fetch_data(State(state): State<AppState>) -> Response {
    match state.service.fetch_all().await {
        Ok(()) => {
            info!("Live data fetched on request");
            Json(json!({
                "status": "ok",
                "tickers": state.service.tickers(),
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch live data");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Analyze the cache, send the summary and return the full report.
async fn analyze_data(State(state): State<AppState>) -> Response {
    match state.service.analyze_and_notify(Utc::now()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            error!(error = %e, "Analysis request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}
