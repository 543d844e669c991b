//! When to rebuild the outline: once after content settles, then after bursts of changes.
//!
//! Pure deadline bookkeeping with no clock or I/O of its own. The caller passes `now` in, asks
//! for the next deadline to size its poll timeout, and takes a rebuild when one is due.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a rebuild became due.
pub enum RebuildReason {
    /// The settle delay after mount elapsed.
    Settled,
    /// Content changes stopped arriving for the debounce window.
    Mutated,
}

#[derive(Debug)]
/// Settle timer plus mutation debounce.
pub struct RebuildSchedule {
    settle_delay: Duration,
    debounce: Duration,
    settle_at: Option<Instant>,
    mutated_at: Option<Instant>,
}

impl RebuildSchedule {
    #[must_use]
    /// Creates an idle schedule.
    pub fn new(settle_delay: Duration, debounce: Duration) -> Self {
        Self {
            settle_delay,
            debounce,
            settle_at: None,
            mutated_at: None,
        }
    }

    /// Arms the one-shot settle timer.
    pub fn mount(&mut self, now: Instant) {
        self.settle_at = Some(now + self.settle_delay);
    }

    /// Records a content change, pushing the debounce deadline back.
    pub fn mutation(&mut self, now: Instant) {
        self.mutated_at = Some(now);
    }

    #[must_use]
    /// The earliest armed deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce_at = self.mutated_at.map(|at| at + self.debounce);
        match (self.settle_at, debounce_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Takes a due rebuild, disarming whatever triggered it.
    ///
    /// A pending mutation absorbs a settle timer that is due at the same time, so the two never
    /// produce back-to-back rebuilds.
    pub fn take_due(&mut self, now: Instant) -> Option<RebuildReason> {
        let debounced = self
            .mutated_at
            .is_some_and(|at| now.saturating_duration_since(at) >= self.debounce);
        let settled = self.settle_at.is_some_and(|at| now >= at);

        if debounced {
            self.mutated_at = None;
            if settled {
                self.settle_at = None;
            }
            return Some(RebuildReason::Mutated);
        }
        if settled {
            self.settle_at = None;
            return Some(RebuildReason::Settled);
        }
        None
    }

    #[must_use]
    /// True while a deadline is armed.
    pub fn is_armed(&self) -> bool {
        self.settle_at.is_some() || self.mutated_at.is_some()
    }

    /// Disarms both timers.
    pub fn cancel(&mut self) {
        self.settle_at = None;
        self.mutated_at = None;
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;
