use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use api::{router, AppState};
use common::{Error, MarketDataSource, Notifier, Result};
use engine::{Engine, ForecastService, PayloadCache};

struct DownSource;

#[async_trait]
impl MarketDataSource for DownSource {
    async fn fetch_time_series(&self, _ticker: &str) -> Result<String> {
        Err(Error::Provider("HTTP 503".to_string()))
    }
}

struct SilentNotifier;

#[async_trait]
impl Notifier for SilentNotifier {
    async fn notify(&self, _subject: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

fn state(api_token: Option<&str>) -> AppState {
    let dir = std::env::temp_dir().join(format!("forecaster-api-{}", uuid::Uuid::new_v4()));
    let service = Arc::new(ForecastService::new(
        Arc::new(DownSource),
        PayloadCache::new(dir),
        Arc::new(SilentNotifier),
        vec!["EUR/USD".to_string()],
    ));
    let (_engine, handle) = Engine::new(service.clone(), Duration::from_secs(60));
    AppState {
        service,
        engine: handle,
        api_token: api_token.map(str::to_string),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_route_greets() {
    let resp = router(state(Some("secret")))
        .oneshot(get("/api/v1/test"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"hello user, you are logged in");
}

#[tokio::test]
async fn healthz_reports_scheduler_state() {
    let resp = router(state(None)).oneshot(get("/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["scheduler"], "stopped");
    assert_eq!(body["tickers"][0], "EUR/USD");
}

#[tokio::test]
async fn protected_routes_need_the_token() {
    let resp = router(state(Some("secret")))
        .oneshot(get("/api/v1/analyzeData"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/v1/analyzeData")
        .header(header::AUTHORIZATION, "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let resp = router(state(Some("secret"))).oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn analyze_on_empty_cache_skips_every_ticker() {
    let resp = router(state(None))
        .oneshot(get("/api/v1/analyzeData"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["skipped"]["EUR/USD"], "no cached data");
    assert!(body["symbols"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_is_a_bad_gateway() {
    let resp = router(state(None))
        .oneshot(get("/api/v1/fetchdata"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("HTTP 503"));
}
