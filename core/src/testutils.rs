//! Scripted in-memory API for session tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::TalentApi;
use crate::models::{
    Candidate, Pagination, SavedCandidate, SavedCandidatesResponse, SearchRequest,
    SearchResponse, ToggleSaveResponse,
};
use crate::outcome::Outcome;
use crate::state::lock;

/// Every call the scripted API received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(SearchRequest),
    Toggle(String),
    Saved,
}

/// Answers calls from queues filled by the test.
///
/// An empty queue answers with a transport failure.
#[derive(Default)]
pub struct ScriptedApi {
    searches: Mutex<VecDeque<Outcome<SearchResponse>>>,
    toggles: Mutex<VecDeque<Outcome<ToggleSaveResponse>>>,
    saved: Mutex<VecDeque<Outcome<SavedCandidatesResponse>>>,
    calls: Mutex<Vec<Call>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for `gate` to be notified before answering
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_search(&self, outcome: Outcome<SearchResponse>) -> &Self {
        lock(&self.searches).push_back(outcome);
        self
    }

    pub fn push_toggle(&self, outcome: Outcome<ToggleSaveResponse>) -> &Self {
        lock(&self.toggles).push_back(outcome);
        self
    }

    pub fn push_saved(&self, outcome: Outcome<SavedCandidatesResponse>) -> &Self {
        lock(&self.saved).push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn next<T>(queue: &Mutex<VecDeque<Outcome<T>>>) -> Outcome<T> {
    lock(queue)
        .pop_front()
        .unwrap_or_else(|| Outcome::TransportFailure("connection refused".to_string()))
}

#[async_trait]
impl TalentApi for ScriptedApi {
    async fn search(&self, request: &SearchRequest) -> Outcome<SearchResponse> {
        lock(&self.calls).push(Call::Search(request.clone()));
        self.wait().await;
        next(&self.searches)
    }

    async fn toggle_save(&self, candidate_id: &str) -> Outcome<ToggleSaveResponse> {
        lock(&self.calls).push(Call::Toggle(candidate_id.to_string()));
        self.wait().await;
        next(&self.toggles)
    }

    async fn saved_candidates(&self) -> Outcome<SavedCandidatesResponse> {
        lock(&self.calls).push(Call::Saved);
        self.wait().await;
        next(&self.saved)
    }
}

/// Test fixtures for candidates and responses.
pub struct Fixtures;

impl Fixtures {
    pub fn candidate(id: &str, name: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: name.to_string(),
            title: "Frontend Engineer".to_string(),
            location: "Berlin".to_string(),
            experience: "4 years".to_string(),
            education: "BSc Computer Science".to_string(),
            skills: vec!["React".to_string(), "TypeScript".to_string()],
            last_active: "2 days ago".to_string(),
            r#match: 87,
            is_saved: false,
        }
    }

    pub fn page(candidates: Vec<Candidate>, page: u32, total_pages: u32, remaining: u32) -> SearchResponse {
        SearchResponse {
            results: candidates,
            pagination: Some(Pagination {
                page,
                total_pages: Some(total_pages),
                total: None,
                limit: Some(crate::request::SEARCH_PAGE_LIMIT),
            }),
            remaining_free_searches: remaining,
            user_activity: None,
        }
    }

    pub fn saved(candidates: &[Candidate]) -> SavedCandidatesResponse {
        SavedCandidatesResponse {
            candidates: candidates
                .iter()
                .map(|c| SavedCandidate {
                    candidate: Candidate {
                        is_saved: true,
                        ..c.clone()
                    },
                    saved_at: None,
                    extra: Default::default(),
                })
                .collect(),
        }
    }
}
