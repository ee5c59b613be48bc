#![allow(clippy::unwrap_used)]

use axum_test::TestServer;

use crate::{catalog, router::setup_router, state::AppState, StubConfig};

mod search;

pub const TOKEN: &str = "org-token";

pub fn setup_server(free_searches: u32) -> TestServer {
    let config = StubConfig {
        tokens: vec![TOKEN.to_string()],
        free_searches,
    };
    let app_state = AppState::new(&config, catalog::seed());

    TestServer::new(setup_router(app_state)).unwrap()
}

#[tokio::test]
async fn ping_ok() {
    let server = setup_server(1);

    server.get("/health/ping").await.assert_status_ok();
}

#[tokio::test]
async fn auth_ping_requires_token() {
    let server = setup_server(1);

    server
        .get("/health/auth")
        .await
        .assert_status_unauthorized();
    server
        .get("/health/auth")
        .authorization_bearer("wrong")
        .await
        .assert_status_unauthorized();
    server
        .get("/health/auth")
        .authorization_bearer(TOKEN)
        .await
        .assert_status_ok();
}
