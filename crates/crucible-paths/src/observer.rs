//! Hooks into a running search: progress reporting and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::state::SearchState;

/// Receives callbacks from [`CrucibleRange`](crate::CrucibleRange) while a
/// query runs. Every method has a no-op default.
pub trait SearchObserver {
    /// Called once per frontier pop, before the entry is examined.
    /// `iteration` starts at 1.
    fn on_pop(&mut self, _iteration: u64) {}

    /// Called when `state` is settled at its final `cost`.
    fn on_settle(&mut self, _state: SearchState, _cost: u64) {}

    /// Called once when the destination is reached.
    fn on_found(&mut self, _cost: u64, _iterations: u64) {}

    /// Called once when the frontier empties without reaching the
    /// destination.
    fn on_exhausted(&mut self, _iterations: u64) {}

    /// Polled once per frontier pop; returning `true` aborts the search
    /// with [`SolveError::Cancelled`](crate::SolveError::Cancelled).
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Logs the iteration count at `info` level every `every` pops, and the
/// total once the search finishes.
#[derive(Debug, Clone, Copy)]
pub struct ProgressLog {
    every: u64,
}

impl ProgressLog {
    /// One progress line per hundred thousand pops.
    pub const DEFAULT_EVERY: u64 = 100_000;

    /// Log every `every` pops. Zero is treated as one.
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }

    /// The logging interval.
    pub fn every(&self) -> u64 {
        self.every
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EVERY)
    }
}

impl SearchObserver for ProgressLog {
    fn on_pop(&mut self, iteration: u64) {
        if iteration % self.every == 0 {
            log::info!("iteration {iteration}");
        }
    }

    fn on_found(&mut self, cost: u64, iterations: u64) {
        log::info!("reached destination at cost {cost} after {iterations} iterations");
    }

    fn on_exhausted(&mut self, iterations: u64) {
        log::info!("frontier exhausted after {iterations} iterations");
    }
}

/// A cloneable flag that cancels every search observing it.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// while the search runs with the other.
#[derive(Debug, Default, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl SearchObserver for CancelToken {
    fn is_cancelled(&self) -> bool {
        CancelToken::is_cancelled(self)
    }
}

/// Combines a [`CancelToken`] with another observer.
#[derive(Debug, Clone)]
pub struct Cancellable<O> {
    pub token: CancelToken,
    pub inner: O,
}

impl<O: SearchObserver> Cancellable<O> {
    pub fn new(token: CancelToken, inner: O) -> Self {
        Self { token, inner }
    }
}

impl<O: SearchObserver> SearchObserver for Cancellable<O> {
    fn on_pop(&mut self, iteration: u64) {
        self.inner.on_pop(iteration)
    }

    fn on_settle(&mut self, state: SearchState, cost: u64) {
        self.inner.on_settle(state, cost)
    }

    fn on_found(&mut self, cost: u64, iterations: u64) {
        self.inner.on_found(cost, iterations)
    }

    fn on_exhausted(&mut self, iterations: u64) {
        self.inner.on_exhausted(iterations)
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.inner.is_cancelled()
    }
}
