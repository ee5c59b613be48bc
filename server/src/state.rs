use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::catalog::CatalogEntry;

/// Stand-in settings, read from the environment in `main`
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Bearer tokens accepted by the API, one organization each
    pub tokens: Vec<String>,
    /// Free searches every organization starts with
    pub free_searches: u32,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            tokens: vec!["dev-token".to_string()],
            free_searches: 10,
        }
    }
}

#[derive(Debug)]
pub struct Account {
    pub remaining_searches: u32,
    /// Saved candidate ids with the time they were saved, oldest first
    pub saved: Vec<(String, DateTime<Utc>)>,
}

impl Account {
    pub fn is_saved(&self, candidate_id: &str) -> bool {
        self.saved.iter().any(|(id, _)| id == candidate_id)
    }

    /// Flip saved membership. Returns `true` when the candidate is now saved.
    pub fn toggle(&mut self, candidate_id: &str) -> bool {
        if self.is_saved(candidate_id) {
            self.saved.retain(|(id, _)| id != candidate_id);
            false
        } else {
            self.saved.push((candidate_id.to_string(), Utc::now()));
            true
        }
    }
}

#[derive(Debug)]
pub struct Store {
    pub catalog: Vec<CatalogEntry>,
    pub accounts: HashMap<String, Account>,
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(config: &StubConfig, catalog: Vec<CatalogEntry>) -> Self {
        let accounts = config
            .tokens
            .iter()
            .map(|token| {
                (
                    token.clone(),
                    Account {
                        remaining_searches: config.free_searches,
                        saved: vec![],
                    },
                )
            })
            .collect();

        Self {
            store: Arc::new(Mutex::new(Store { catalog, accounts })),
        }
    }

    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_known_token(&self, token: &str) -> bool {
        self.store().accounts.contains_key(token)
    }
}
