#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

//! Development stand-in for the talent search API.
//!
//! Serves the search, save-toggle and saved-candidates endpoints from an
//! in-memory catalog with per-token quotas.

use tokio::net::TcpListener;
use tracing::info;

pub mod catalog;
pub mod errors;
pub mod router;
pub mod state;

#[cfg(test)]
mod test;

pub use errors::{ApplicationError, RestError};
pub use router::setup_router;
pub use state::{AppState, StubConfig};

/// Serve the API on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, app_state: AppState) -> Result<(), ApplicationError> {
    info!("Listening on: {}", listener.local_addr()?);

    axum::serve(listener, setup_router(app_state).into_make_service())
        .await
        .map_err(ApplicationError::CannotServe)
}
