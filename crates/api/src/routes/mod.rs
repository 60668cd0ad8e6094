mod api;
mod health;

pub use api::api_router;
pub use health::health_router;
