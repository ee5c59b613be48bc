use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::models::{Candidate, Pagination, SearchResponse};

/// What the caller has to do after an outcome was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// State was updated, nothing else to show
    Updated,
    /// Transient notice for the user
    Notice(String),
    /// Send the user to the login screen
    RedirectToLogin,
    /// The call failed before producing a response; state is unchanged
    /// and the request can be retried
    TransportFailure(String),
}

/// Remaining free searches, shared by every search screen of a session.
///
/// Only ever assigned from a server response, never decremented here.
#[derive(Debug, Clone, Default)]
pub struct QuotaState {
    remaining: Arc<Mutex<Option<u32>>>,
}

impl QuotaState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first response arrives
    pub fn remaining(&self) -> Option<u32> {
        *lock(&self.remaining)
    }

    pub fn set(&self, remaining: u32) {
        *lock(&self.remaining) = Some(remaining);
    }

    pub fn label(&self) -> String {
        quota_label(self.remaining())
    }
}

pub fn quota_label(remaining: Option<u32>) -> String {
    match remaining {
        None => "Searches remaining: unknown".to_string(),
        Some(1) => "1 search remaining".to_string(),
        Some(n) => format!("{} searches remaining", n),
    }
}

/// Append-only log of the activity entries echoed by the backend
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Arc<Mutex<Vec<Value>>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: Option<Value>) {
        if let Some(entry) = entry.filter(|e| !e.is_null()) {
            lock(&self.entries).push(entry);
        }
    }

    pub fn entries(&self) -> Vec<Value> {
        lock(&self.entries).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result set of one search screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub results: Vec<Candidate>,
    pub pagination: Option<Pagination>,
}

impl ResultSet {
    /// Replace everything with the response's page
    pub fn replace(&mut self, response: &SearchResponse) {
        self.results = response.results.clone();
        self.pagination = response.pagination.clone();
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.pagination = None;
    }

    /// Flip `is_saved` of the candidate with the given id.
    /// Returns the new value, or `None` if the id is not in the set.
    pub fn flip_saved(&mut self, candidate_id: &str) -> Option<bool> {
        self.results
            .iter_mut()
            .find(|c| c.id == candidate_id)
            .map(|c| {
                c.is_saved = !c.is_saved;
                c.is_saved
            })
    }

    pub fn current_page(&self) -> Option<u32> {
        self.pagination.as_ref().map(|p| p.page)
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
