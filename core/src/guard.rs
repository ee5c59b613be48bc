use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::state::lock;

/// Holds a control disabled until dropped
pub(crate) struct FlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlagGuard<'a> {
    /// `None` when the control is already disabled
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlagGuard { flag })
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Per-key variant of [`FlagGuard`], one disabled control per candidate id
pub(crate) struct KeyGuard<'a> {
    keys: &'a Mutex<HashSet<String>>,
    key: String,
}

impl<'a> KeyGuard<'a> {
    pub(crate) fn acquire(keys: &'a Mutex<HashSet<String>>, key: &str) -> Option<Self> {
        if lock(keys).insert(key.to_string()) {
            Some(KeyGuard {
                keys,
                key: key.to_string(),
            })
        } else {
            None
        }
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        lock(self.keys).remove(&self.key);
    }
}
