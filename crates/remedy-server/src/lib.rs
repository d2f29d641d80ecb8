// ABOUTME: HTTP server for remedy, exposing treatment records and disease metadata as a REST API.
// ABOUTME: Uses Axum with shared store state; writes are gated by an optional API key layer.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, RemedyConfig};
pub use routes::create_router;
