use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use crate::{router::auth::Organization, state::AppState};

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health/ping", get(ping))
        .route("/health/auth", get(auth_ping))
}

pub async fn ping() -> impl IntoResponse {
    StatusCode::OK
}

/// Succeeds only with a valid bearer token
pub async fn auth_ping(_organization: Organization) -> impl IntoResponse {
    StatusCode::OK
}
