use std::time::{Duration, Instant};

/// Delay between the last keystroke and the filter taking effect
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(600);

/// A value that only takes effect once input has been quiet for `delay`.
///
/// Time is passed in by the caller so the same type works for a UI event
/// loop and for deterministic tests.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    current: T,
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            current: initial,
            pending: None,
            delay,
        }
    }

    /// Record new input; restarts the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Promote pending input whose quiet period has elapsed.
    /// Returns `true` when the effective value changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if !ready {
            return false;
        }

        match self.pending.take() {
            Some((value, _)) if value != self.current => {
                self.current = value;
                true
            }
            _ => false,
        }
    }

    /// Apply a value immediately, dropping anything pending
    pub fn set_now(&mut self, value: T) {
        self.pending = None;
        self.current = value;
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will become effective, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }
}
