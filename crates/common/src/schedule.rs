use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A unit of periodic work driven by the scheduler.
///
/// The scheduler only knows about this trait; the forecasting core never
/// depends on it.
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    async fn trigger(&self, now: DateTime<Utc>);
}
