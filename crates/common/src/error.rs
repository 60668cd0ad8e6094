use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The candle sequence is shorter than the window a computation needs.
    #[error("insufficient data: need {required} candles, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Candle records with missing fields or non-finite values.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("Market data provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Error::InsufficientData { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fail with `InsufficientData` unless `len >= required`.
pub fn ensure_len(len: usize, required: usize) -> Result<()> {
    if len < required {
        return Err(Error::InsufficientData {
            required,
            available: len,
        });
    }
    Ok(())
}
