#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod api;
pub mod debounce;
pub mod error;
mod guard;
pub mod models;
pub mod outcome;
pub mod request;
pub mod session;
pub mod shortlist;
pub mod state;

#[cfg(test)]
pub mod testutils;

// Re-export commonly used types
pub use api::{TalentApi, LOGIN_PATH};
pub use error::{Error, Result};
pub use models::{
    Candidate, Pagination, SavedCandidate, SavedCandidatesResponse, SearchFilters, SearchRequest,
    SearchResponse, ToggleSaveResponse,
};
pub use outcome::{classify, Outcome};
pub use request::{SearchForm, SearchMode, SEARCH_PAGE_LIMIT};
pub use session::SearchSession;
pub use shortlist::ShortlistSession;
pub use state::{quota_label, ActivityLog, Effect, QuotaState, ResultSet};
