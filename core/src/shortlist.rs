use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{debug, warn};

use crate::api::TalentApi;
use crate::debounce::{Debounced, FILTER_DEBOUNCE};
use crate::error::{Error, Result};
use crate::guard::{FlagGuard, KeyGuard};
use crate::models::SavedCandidate;
use crate::outcome::Outcome;
use crate::state::{lock, ActivityLog, Effect};

/// Case-sensitive substring match on the candidate name
pub fn matches_name(entry: &SavedCandidate, filter: &str) -> bool {
    entry.candidate.name.contains(filter)
}

/// The organization's saved candidates, fetched from their own endpoint.
///
/// This list is not the search result set: removal re-fetches it so the
/// entry disappears instead of flipping a flag.
pub struct ShortlistSession<A: TalentApi + ?Sized> {
    api: Arc<A>,
    entries: Mutex<Vec<SavedCandidate>>,
    filter: Mutex<Debounced<String>>,
    activity: ActivityLog,
    loading: AtomicBool,
    removing: Mutex<HashSet<String>>,
}

impl<A: TalentApi + ?Sized> ShortlistSession<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_activity(api, ActivityLog::new())
    }

    pub fn with_activity(api: Arc<A>, activity: ActivityLog) -> Self {
        Self {
            api,
            entries: Mutex::new(Vec::new()),
            filter: Mutex::new(Debounced::new(String::new(), FILTER_DEBOUNCE)),
            activity,
            loading: AtomicBool::new(false),
            removing: Mutex::new(HashSet::new()),
        }
    }

    /// Every fetched entry, ignoring the filter
    pub fn entries(&self) -> Vec<SavedCandidate> {
        lock(&self.entries).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Fetch the saved list and replace the local copy
    pub async fn refresh(&self) -> Result<Effect> {
        let _guard = FlagGuard::acquire(&self.loading)
            .ok_or_else(|| Error::InFlight("shortlist".to_string()))?;

        Ok(self.fetch().await)
    }

    /// Unsave a candidate, then re-fetch the list
    pub async fn remove(&self, candidate_id: &str) -> Result<Effect> {
        let _guard = KeyGuard::acquire(&self.removing, candidate_id)
            .ok_or_else(|| Error::InFlight(format!("removal of {}", candidate_id)))?;

        debug!(candidate_id, "Removing candidate from shortlist");

        match self.api.toggle_save(candidate_id).await {
            Outcome::Ok(response) => {
                self.activity.push(response.user_activity);
                Ok(self.fetch().await)
            }
            Outcome::Rejected { message, .. } => Ok(Effect::Notice(message)),
            Outcome::Unauthorized => Ok(Effect::RedirectToLogin),
            Outcome::TransportFailure(reason) => {
                warn!(candidate_id, %reason, "Shortlist removal failed in transport");
                Ok(Effect::TransportFailure(reason))
            }
        }
    }

    /// Record a keystroke in the name filter
    pub fn type_filter(&self, text: &str, now: Instant) {
        lock(&self.filter).push(text.to_string(), now);
    }

    /// Apply a filter without waiting for the quiet period
    pub fn set_filter(&self, text: &str) {
        lock(&self.filter).set_now(text.to_string());
    }

    /// Promote a pending filter. Returns `true` when the visible list changed.
    pub fn settle(&self, now: Instant) -> bool {
        lock(&self.filter).settle(now)
    }

    pub fn filter(&self) -> String {
        lock(&self.filter).current().clone()
    }

    /// When a pending filter becomes effective, if one is pending
    pub fn filter_deadline(&self) -> Option<Instant> {
        lock(&self.filter).deadline()
    }

    /// Entries that match the effective filter
    pub fn visible(&self) -> Vec<SavedCandidate> {
        let filter = self.filter();
        lock(&self.entries)
            .iter()
            .filter(|e| matches_name(e, &filter))
            .cloned()
            .collect()
    }

    async fn fetch(&self) -> Effect {
        match self.api.saved_candidates().await {
            Outcome::Ok(response) => {
                debug!(count = response.candidates.len(), "Fetched shortlist");
                *lock(&self.entries) = response.candidates;
                Effect::Updated
            }
            Outcome::Rejected { message, .. } => Effect::Notice(message),
            Outcome::Unauthorized => Effect::RedirectToLogin,
            Outcome::TransportFailure(reason) => {
                warn!(%reason, "Shortlist fetch failed in transport");
                Effect::TransportFailure(reason)
            }
        }
    }
}
