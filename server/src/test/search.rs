use axum::http::StatusCode;
use serde_json::json;
use talent_core::SearchResponse;

use crate::test::{setup_server, TOKEN};

#[tokio::test]
async fn search_ok_spends_quota() {
    let server = setup_server(8);

    let response = server
        .post("/search")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "query": "React developer",
            "isAIsearch": false,
            "isGlobalSearch": true,
            "limit": 50,
            "page": 1,
            "filters": {}
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<SearchResponse>();

    assert!(!body.results.is_empty());
    assert_eq!(body.remaining_free_searches, 7);
    assert_eq!(body.pagination.unwrap().page, 1);
    assert_eq!(body.user_activity.unwrap()["type"], json!("search"));
}

#[tokio::test]
async fn search_paginates() {
    let server = setup_server(5);

    let response = server
        .post("/search")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "query": "React developer",
            "isAIsearch": true,
            "isGlobalSearch": true,
            "limit": 2,
            "page": 2
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<SearchResponse>();
    let pagination = body.pagination.unwrap();

    assert_eq!(body.results.len(), 2);
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.total_pages, Some(2));
    assert_eq!(pagination.total, Some(4));
}

#[tokio::test]
async fn search_without_token_is_unauthorized() {
    let server = setup_server(5);

    let response = server
        .post("/search")
        .json(&json!({
            "query": "React",
            "isAIsearch": false,
            "isGlobalSearch": true,
            "limit": 50,
            "page": 1
        }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn search_empty_query_bad_request() {
    let server = setup_server(5);

    let response = server
        .post("/search")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "query": "   ",
            "isAIsearch": false,
            "isGlobalSearch": false,
            "limit": 50,
            "page": 1
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_exhausted_quota_forbidden() {
    let server = setup_server(1);
    let body = json!({
        "query": "Rust",
        "isAIsearch": false,
        "isGlobalSearch": true,
        "limit": 50,
        "page": 1
    });

    server
        .post("/search")
        .authorization_bearer(TOKEN)
        .json(&body)
        .await
        .assert_status_ok();

    let response = server
        .post("/search")
        .authorization_bearer(TOKEN)
        .json(&body)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    response.assert_json(&json!({ "error": "Daily limit reached" }));
}
