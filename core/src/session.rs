use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::api::TalentApi;
use crate::error::{Error, Result};
use crate::guard::{FlagGuard, KeyGuard};
use crate::models::{Candidate, Pagination, SearchRequest, SearchResponse};
use crate::outcome::Outcome;
use crate::request::{SearchForm, SearchMode};
use crate::state::{lock, ActivityLog, Effect, QuotaState, ResultSet};

/// Client-side state machine of one search screen.
///
/// Owns the screen's result set and shares the quota and activity log
/// with the other screens of the session. All methods take `&self`, so a
/// search and a save can be in flight at the same time; a second search
/// (or a second save of the same candidate) is refused while one is
/// pending.
pub struct SearchSession<A: TalentApi + ?Sized> {
    api: Arc<A>,
    mode: SearchMode,
    results: Mutex<ResultSet>,
    /// Request behind the displayed results, used for paging
    last_request: Mutex<Option<SearchRequest>>,
    /// Most recently sent request, used by `retry`
    pending_request: Mutex<Option<SearchRequest>>,
    quota: QuotaState,
    activity: ActivityLog,
    searching: AtomicBool,
    saving: Mutex<HashSet<String>>,
}

impl<A: TalentApi + ?Sized> SearchSession<A> {
    pub fn new(api: Arc<A>, mode: SearchMode) -> Self {
        Self::with_shared(api, mode, QuotaState::new(), ActivityLog::new())
    }

    /// Create a screen that shares quota and activity with other screens
    pub fn with_shared(
        api: Arc<A>,
        mode: SearchMode,
        quota: QuotaState,
        activity: ActivityLog,
    ) -> Self {
        Self {
            api,
            mode,
            results: Mutex::new(ResultSet::default()),
            last_request: Mutex::new(None),
            pending_request: Mutex::new(None),
            quota,
            activity,
            searching: AtomicBool::new(false),
            saving: Mutex::new(HashSet::new()),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn quota(&self) -> &QuotaState {
        &self.quota
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn results(&self) -> Vec<Candidate> {
        lock(&self.results).results.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        lock(&self.results).pagination.clone()
    }

    pub fn snapshot(&self) -> ResultSet {
        lock(&self.results).clone()
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        lock(&self.last_request).clone()
    }

    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::Acquire)
    }

    pub fn is_saving(&self, candidate_id: &str) -> bool {
        lock(&self.saving).contains(candidate_id)
    }

    /// Submit a new query. Always starts from the first page.
    pub async fn submit(&self, form: &SearchForm) -> Result<Effect> {
        let request = form.build(self.mode, 1)?;
        self.run(request).await
    }

    /// Re-run the previous query on another page
    pub async fn goto_page(&self, page: u32) -> Result<Effect> {
        let mut request = self.last_request().ok_or(Error::NoPreviousSearch)?;

        let last = self
            .pagination()
            .and_then(|p| p.total_pages)
            .unwrap_or(u32::MAX);
        if page == 0 || page > last {
            return Err(Error::PageOutOfRange {
                requested: page,
                last,
            });
        }

        request.page = page;
        self.run(request).await
    }

    pub async fn next_page(&self) -> Result<Effect> {
        let page = self.current_page()?;
        self.goto_page(page.saturating_add(1)).await
    }

    pub async fn prev_page(&self) -> Result<Effect> {
        let page = self.current_page()?;
        self.goto_page(page.saturating_sub(1)).await
    }

    /// Repeat the most recently sent request as is, e.g. after a transport failure
    pub async fn retry(&self) -> Result<Effect> {
        let request = lock(&self.pending_request)
            .clone()
            .ok_or(Error::NoPreviousSearch)?;
        self.run(request).await
    }

    /// Toggle the saved flag of one candidate in the current result set
    pub async fn toggle_save(&self, candidate_id: &str) -> Result<Effect> {
        let _guard = KeyGuard::acquire(&self.saving, candidate_id)
            .ok_or_else(|| Error::InFlight(format!("save for {}", candidate_id)))?;

        debug!(candidate_id, "Toggling saved state");

        let effect = match self.api.toggle_save(candidate_id).await {
            Outcome::Ok(response) => {
                match lock(&self.results).flip_saved(candidate_id) {
                    Some(saved) => debug!(candidate_id, saved, "Saved state flipped"),
                    None => warn!(candidate_id, "Toggled candidate is not in the result set"),
                }
                self.activity.push(response.user_activity);
                Effect::Updated
            }
            Outcome::Rejected { status, message } => {
                debug!(candidate_id, status, "Toggle rejected");
                Effect::Notice(message)
            }
            Outcome::Unauthorized => Effect::RedirectToLogin,
            Outcome::TransportFailure(reason) => {
                warn!(candidate_id, %reason, "Toggle failed in transport");
                Effect::TransportFailure(reason)
            }
        };

        Ok(effect)
    }

    fn current_page(&self) -> Result<u32> {
        let request = self.last_request().ok_or(Error::NoPreviousSearch)?;
        Ok(self
            .pagination()
            .map(|p| p.page)
            .unwrap_or(request.page))
    }

    async fn run(&self, request: SearchRequest) -> Result<Effect> {
        let _guard = FlagGuard::acquire(&self.searching)
            .ok_or_else(|| Error::InFlight(self.mode.as_str().to_string()))?;

        *lock(&self.pending_request) = Some(request.clone());

        debug!(
            query = %request.query,
            page = request.page,
            ai = request.is_ai_search,
            global = request.is_global_search,
            "Running candidate search"
        );

        let outcome = self.api.search(&request).await;
        Ok(self.apply_search(request, outcome))
    }

    /// Only `Ok` and `Rejected` replace the displayed results, so only they
    /// move the paging request along.
    fn apply_search(&self, request: SearchRequest, outcome: Outcome<SearchResponse>) -> Effect {
        match outcome {
            Outcome::Ok(response) => {
                *lock(&self.last_request) = Some(request);
                lock(&self.results).replace(&response);
                self.quota.set(response.remaining_free_searches);
                self.activity.push(response.user_activity);
                Effect::Updated
            }
            Outcome::Rejected { status, message } => {
                debug!(status, %message, "Search rejected");
                *lock(&self.last_request) = Some(request);
                lock(&self.results).clear();
                self.quota.set(0);
                Effect::Notice(message)
            }
            Outcome::Unauthorized => Effect::RedirectToLogin,
            Outcome::TransportFailure(reason) => {
                warn!(%reason, "Search failed in transport");
                Effect::TransportFailure(reason)
            }
        }
    }
}
