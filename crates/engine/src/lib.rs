pub mod cache;
pub mod finazon;
pub mod lifecycle;
pub mod service;

pub use cache::PayloadCache;
pub use finazon::FinazonClient;
pub use lifecycle::{Engine, EngineHandle};
pub use service::ForecastService;
