use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use talent_core::{Candidate, SavedCandidate, SavedCandidatesResponse, ToggleSaveResponse};
use tracing::debug;

use crate::{
    errors::{RestError, RestResult},
    router::auth::Organization,
    state::AppState,
};

pub fn saved_routes() -> Router<AppState> {
    Router::new()
        .route("/candidates/saved", get(list_saved))
        .route("/candidates/:id/save", post(toggle_save))
}

/// Save the candidate if it is not saved, unsave it otherwise
async fn toggle_save(
    State(state): State<AppState>,
    Organization(token): Organization,
    Path(candidate_id): Path<String>,
) -> RestResult<Json<ToggleSaveResponse>> {
    let mut store = state.store();

    if !store
        .catalog
        .iter()
        .any(|e| e.candidate.id == candidate_id)
    {
        return Err(RestError::NotFound(format!(
            "Candidate {} not found",
            candidate_id
        )));
    }

    let account = store
        .accounts
        .get_mut(&token)
        .ok_or(RestError::Unauthorized)?;
    let saved = account.toggle(&candidate_id);

    debug!(%candidate_id, saved, "Toggled saved candidate");

    let (kind, message) = if saved {
        ("save", "Candidate saved")
    } else {
        ("unsave", "Candidate removed from saved list")
    };

    Ok(Json(ToggleSaveResponse {
        message: Some(message.to_string()),
        user_activity: Some(json!({
            "type": kind,
            "candidateId": candidate_id,
            "at": Utc::now().to_rfc3339(),
        })),
    }))
}

async fn list_saved(
    State(state): State<AppState>,
    Organization(token): Organization,
) -> RestResult<Json<SavedCandidatesResponse>> {
    let store = state.store();

    let account = store.accounts.get(&token).ok_or(RestError::Unauthorized)?;

    let candidates = account
        .saved
        .iter()
        .filter_map(|(id, saved_at)| {
            store
                .catalog
                .iter()
                .find(|e| &e.candidate.id == id)
                .map(|e| SavedCandidate {
                    candidate: Candidate {
                        is_saved: true,
                        ..e.candidate.clone()
                    },
                    saved_at: Some(saved_at.to_rfc3339()),
                    extra: Default::default(),
                })
        })
        .collect();

    Ok(Json(SavedCandidatesResponse { candidates }))
}
