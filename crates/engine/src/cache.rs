use std::path::{Path, PathBuf};

use tracing::{debug, info};

use common::{Candle, Error, Result, TimeSeriesPayload};

/// On-disk store of the raw provider payload, one JSON file per ticker.
pub struct PayloadCache {
    dir: PathBuf,
}

impl PayloadCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `EUR/USD` is stored as `data_EUR_USD.json`.
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("data_{}.json", ticker.replace('/', "_")))
    }

    /// Overwrite the cached payload for `ticker`. The body must be JSON; it
    /// is written back pretty-printed.
    pub async fn store(&self, ticker: &str, body: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let pretty = serde_json::to_string_pretty(&value)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(ticker);
        tokio::fs::write(&path, pretty).await?;
        info!(ticker, path = %path.display(), "Payload cached");
        Ok(())
    }

    /// Load the cached candles for `ticker`, sorted by timestamp with
    /// duplicate timestamps dropped. `None` when nothing is cached yet.
    pub async fn load(&self, ticker: &str) -> Result<Option<Vec<Candle>>> {
        let path = self.path_for(ticker);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(ticker, path = %path.display(), "No cached payload");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let payload: TimeSeriesPayload = serde_json::from_str(&content).map_err(|e| {
            Error::MalformedInput(format!("cached payload for {ticker} is invalid: {e}"))
        })?;

        let mut candles = payload.data;
        candles.sort_by_key(|c| c.t);
        candles.dedup_by_key(|c| c.t);
        Ok(Some(candles))
    }
}
