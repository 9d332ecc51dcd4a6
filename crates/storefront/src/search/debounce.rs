//! Debounce for search-as-you-type.
//!
//! The caller supplies the clock, which keeps this usable from any event
//! loop and testable without sleeping.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and running the search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Holds the latest pushed value until `delay` has passed without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value`, due `delay` after `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if due <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Time left until the pending value is due; `None` if nothing is pending.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    /// Take the pending value regardless of its deadline (e.g. on form submit).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
