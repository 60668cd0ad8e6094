use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::debug;

use common::{Error, MarketDataSource, Result};

const BASE_URL: &str = "https://api.finazon.io";
const TIME_SERIES_PATH: &str = "/latest/finazon/forex/time_series";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST client for the Finazon forex time-series endpoint.
pub struct FinazonClient {
    api_key: String,
    interval: String,
    page_size: u32,
    base_url: String,
    http: Client,
}

impl FinazonClient {
    pub fn new(api_key: impl Into<String>, interval: impl Into<String>, page_size: u32) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            interval: interval.into(),
            page_size,
            base_url: BASE_URL.to_string(),
            http,
        })
    }

    /// Point the client at another host, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, ticker: &str) -> Result<Request> {
        let page_size = self.page_size.to_string();
        self.http
            .get(format!("{}{TIME_SERIES_PATH}", self.base_url))
            .query(&[
                ("ticker", ticker),
                ("interval", self.interval.as_str()),
                ("page", "0"),
                ("page_size", page_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| Error::Http(e.to_string()))
    }
}

#[async_trait]
impl MarketDataSource for FinazonClient {
    async fn fetch_time_series(&self, ticker: &str) -> Result<String> {
        let request = self.request(ticker)?;
        debug!(ticker, interval = %self.interval, page_size = self.page_size, "Fetching time series");

        let resp = self
            .http
            .execute(request)
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Provider(format!("HTTP {status} for {ticker}: {body}")));
        }
        Ok(body)
    }
}
