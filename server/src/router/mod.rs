use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod saved;
pub mod search;

pub fn setup_router(app_state: AppState) -> Router {
    // Authentication is per endpoint: handlers that need it take `Organization`
    Router::new()
        .merge(health::health_routes())
        .merge(search::search_routes())
        .merge(saved::saved_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
