use async_trait::async_trait;

use crate::models::{SavedCandidatesResponse, SearchRequest, SearchResponse, ToggleSaveResponse};
use crate::outcome::Outcome;

/// Path the UI is sent to when a call comes back unauthorized
pub const LOGIN_PATH: &str = "/login";

/// Remote talent API, one network call per method invocation.
///
/// Implementations attach the auth context themselves and must never
/// retry: transport errors are reported as [`Outcome::TransportFailure`].
#[async_trait]
pub trait TalentApi: Send + Sync {
    /// Run a candidate search.
    async fn search(&self, request: &SearchRequest) -> Outcome<SearchResponse>;

    /// Toggle the saved state of one candidate.
    async fn toggle_save(&self, candidate_id: &str) -> Outcome<ToggleSaveResponse>;

    /// List the organization's saved candidates.
    async fn saved_candidates(&self) -> Outcome<SavedCandidatesResponse>;
}
