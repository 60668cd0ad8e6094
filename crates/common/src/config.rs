use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Runtime configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Market data
    pub finazon_api_key: String,
    pub watchlist_path: String,
    pub cache_dir: String,

    // HTTP API
    pub port: u16,
    /// Bearer token protecting fetch/analyze routes. `None` disables auth.
    pub api_token: Option<String>,

    // Scheduler
    pub schedule_interval_secs: u64,
    pub scheduler_autostart: bool,

    // Telegram notifications (both must be set to enable)
    pub telegram_token: Option<String>,
    pub telegram_chat_ids: Vec<i64>,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let telegram_chat_ids = match optional_env("TELEGRAM_CHAT_IDS") {
            Some(raw) => parse_chat_ids(&raw)?,
            None => Vec::new(),
        };

        Ok(Config {
            finazon_api_key: required_env("FINAZON_API_KEY")?,
            watchlist_path: optional_env("WATCHLIST_PATH")
                .unwrap_or_else(|| "config/watchlist.toml".to_string()),
            cache_dir: optional_env("CACHE_DIR").unwrap_or_else(|| "data".to_string()),
            port: parse_env("PORT")?.unwrap_or(5000),
            api_token: optional_env("API_TOKEN").filter(|t| !t.is_empty()),
            schedule_interval_secs: parse_env("SCHEDULE_INTERVAL_SECS")?.unwrap_or(60),
            scheduler_autostart: parse_env("SCHEDULER_AUTOSTART")?.unwrap_or(false),
            telegram_token: optional_env("TELEGRAM_TOKEN").filter(|t| !t.is_empty()),
            telegram_chat_ids,
        })
    }

    /// True when both a bot token and at least one chat id are configured.
    pub fn telegram_enabled(&self) -> bool {
        self.telegram_token.is_some() && !self.telegram_chat_ids.is_empty()
    }
}

/// Watched symbols and request shape (TOML).
///
/// Example `config/watchlist.toml`:
/// ```toml
/// interval = "1m"
/// page_size = 40
///
/// [[symbol]]
/// ticker = "EUR/USD"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchlistConfig {
    /// Candle interval requested from the provider.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Number of candles per request.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(rename = "symbol", default)]
    pub symbols: Vec<SymbolConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SymbolConfig {
    /// Provider ticker, e.g. "EUR/USD".
    pub ticker: String,
}

impl WatchlistConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read watchlist at '{path}': {e}")))?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("failed to parse watchlist at '{path}': {e}")))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut cfg: WatchlistConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        if cfg.symbols.is_empty() {
            cfg.symbols = Self::default().symbols;
        }
        Ok(cfg)
    }

    pub fn tickers(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.symbols
            .iter()
            .filter(|s| seen.insert(s.ticker.clone()))
            .map(|s| s.ticker.clone())
            .collect()
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            page_size: default_page_size(),
            symbols: ["EUR/USD", "GBP/USD", "AUD/USD"]
                .into_iter()
                .map(|ticker| SymbolConfig {
                    ticker: ticker.to_string(),
                })
                .collect(),
        }
    }
}

fn default_interval() -> String {
    "1m".to_string()
}

fn default_page_size() -> u32 {
    40
}

fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|_| {
                Error::Config(format!("TELEGRAM_CHAT_IDS contains non-numeric ID: '{s}'"))
            })
        })
        .collect()
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        Error::Config(format!(
            "Required environment variable '{key}' is not set. Check your .env file."
        ))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} has an invalid value: '{raw}'"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_parses_symbols_and_dedups() {
        let cfg = WatchlistConfig::parse(
            r#"
            interval = "5m"
            page_size = 60

            [[symbol]]
            ticker = "EUR/USD"

            [[symbol]]
            ticker = "EUR/USD"

            [[symbol]]
            ticker = "USD/JPY"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.interval, "5m");
        assert_eq!(cfg.page_size, 60);
        assert_eq!(cfg.tickers(), vec!["EUR/USD", "USD/JPY"]);
    }

    #[test]
    fn empty_watchlist_falls_back_to_defaults() {
        let cfg = WatchlistConfig::parse("").unwrap();
        assert_eq!(cfg.page_size, 40);
        assert_eq!(cfg.tickers(), vec!["EUR/USD", "GBP/USD", "AUD/USD"]);
    }

    #[test]
    fn chat_ids_reject_non_numeric() {
        assert_eq!(parse_chat_ids("1, 2").unwrap(), vec![1, 2]);
        assert!(parse_chat_ids("1,abc").is_err());
    }
}
