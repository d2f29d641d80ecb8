// ABOUTME: API handler modules for the remedy HTTP server.
// ABOUTME: Organizes handlers by resource and moves store calls onto the blocking pool.

use std::sync::Arc;

use remedy_store::StoreError;

use crate::app_state::{AppState, SharedState};
use crate::error::ApiError;

pub mod disease_info;
pub mod medicines;

/// Run a store operation on tokio's blocking pool. Store calls hold a file
/// lock across fsync and must not run on an async worker thread.
pub(crate) async fn with_store<R, F>(state: &SharedState, f: F) -> Result<R, ApiError>
where
    F: FnOnce(&AppState) -> Result<R, StoreError> + Send + 'static,
    R: Send + 'static,
{
    let state = Arc::clone(state);
    Ok(tokio::task::spawn_blocking(move || f(&state)).await??)
}
