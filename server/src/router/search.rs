use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde_json::json;
use talent_core::{Candidate, Pagination, SearchRequest, SearchResponse};
use tracing::debug;

use crate::{
    catalog,
    errors::{RestError, RestResult},
    router::auth::Organization,
    state::AppState,
};

const MAX_PAGE_LIMIT: u32 = 100;

pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", post(search))
}

/// Candidate search. Every accepted request spends one free search.
async fn search(
    State(state): State<AppState>,
    Organization(token): Organization,
    Json(request): Json<SearchRequest>,
) -> RestResult<Json<SearchResponse>> {
    if request.query.trim().is_empty() {
        return Err(RestError::BadRequest("Query cannot be empty".to_string()));
    }

    let mut store = state.store();

    let account = store
        .accounts
        .get_mut(&token)
        .ok_or(RestError::Unauthorized)?;
    if account.remaining_searches == 0 {
        return Err(RestError::QuotaExhausted);
    }
    account.remaining_searches -= 1;
    let remaining = account.remaining_searches;

    let hits = catalog::search(&store.catalog, &request);
    let account = store.accounts.get(&token).ok_or(RestError::Unauthorized)?;

    let limit = request.limit.clamp(1, MAX_PAGE_LIMIT);
    let page = request.page.max(1);
    let total = hits.len();
    let total_pages = total.div_ceil(limit as usize).max(1);
    let skip = (page as usize - 1).saturating_mul(limit as usize);

    let results: Vec<Candidate> = hits
        .into_iter()
        .skip(skip)
        .take(limit as usize)
        .map(|c| Candidate {
            is_saved: account.is_saved(&c.id),
            ..c
        })
        .collect();

    debug!(
        query = %request.query,
        page,
        total,
        remaining,
        "Answered search"
    );

    let kind = if request.is_ai_search {
        "ai_search"
    } else {
        "search"
    };

    Ok(Json(SearchResponse {
        results,
        pagination: Some(Pagination {
            page,
            total_pages: Some(u32::try_from(total_pages).unwrap_or(u32::MAX)),
            total: Some(total as u64),
            limit: Some(limit),
        }),
        remaining_free_searches: remaining,
        user_activity: Some(json!({
            "type": kind,
            "query": request.query,
            "at": Utc::now().to_rfc3339(),
        })),
    }))
}
