//! Registry of named long-running effects.
//!
//! Invariants:
//! - at most one registration per [`EffectId`];
//! - `cancel_all` drains every registration under one lock acquisition;
//! - every registration gets a fresh generation, so results produced by a task
//!   that was cancelled (or replaced) can be told apart from current ones;
//! - a task that finishes on its own stays current until the next `start` or
//!   `cancel` of its id, so its last result is still delivered;
//! - `cancel_all` also bumps the epoch, which one-shot tasks capture when they
//!   are spawned; their results are dropped once the epoch has moved on.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::AbortHandle;

use super::EffectId;

/// One live registration.
#[derive(Debug)]
struct Registration {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Debug, Default)]
struct Inner {
    next_generation: u64,
    epoch: u64,
    running: HashMap<EffectId, Registration>,
    current: HashMap<EffectId, u64>,
}

/// Shared handle to the registry. Cloning shares the same registrations.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// What: Start the effect `id` unless it is already registered.
    ///
    /// Inputs:
    /// - `id`: Effect name
    /// - `make`: Builds the task future from the registration generation
    ///
    /// Output:
    /// - `true` if a task was spawned, `false` if `id` was already running.
    ///
    /// Details:
    /// - Must be called inside a tokio runtime.
    /// - On natural completion the task deregisters itself, but only while its
    ///   generation is still the registered one.
    pub fn start<F, Fut>(&self, id: EffectId, make: F) -> bool
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.running.contains_key(&id) {
            tracing::debug!(effect = ?id, "effect already running");
            return false;
        }
        inner.next_generation += 1;
        let generation = inner.next_generation;
        let fut = make(generation);
        let registry = self.clone();
        // The lock is held until the registration is inserted, so the task's
        // own deregistration cannot run first.
        let handle = tokio::spawn(async move {
            fut.await;
            registry.finish(id, generation);
        })
        .abort_handle();
        inner.running.insert(id, Registration { generation, handle });
        inner.current.insert(id, generation);
        tracing::debug!(effect = ?id, generation, "effect started");
        true
    }

    fn finish(&self, id: EffectId, generation: u64) {
        let mut inner = self.lock();
        if inner
            .running
            .get(&id)
            .is_some_and(|r| r.generation == generation)
        {
            inner.running.remove(&id);
            tracing::debug!(effect = ?id, generation, "effect finished");
        }
    }

    /// What: Cancel the effect `id`.
    ///
    /// Output:
    /// - `true` if a registration was aborted, `false` if `id` was not running.
    pub fn cancel(&self, id: EffectId) -> bool {
        let mut inner = self.lock();
        inner.current.remove(&id);
        let removed = inner.running.remove(&id);
        removed.is_some_and(|r| {
            r.handle.abort();
            tracing::debug!(effect = ?id, generation = r.generation, "effect cancelled");
            true
        })
    }

    /// What: Cancel every registered effect.
    ///
    /// Output:
    /// - Number of registrations aborted.
    ///
    /// Details:
    /// - Draining and aborting happen under one lock acquisition, so no `start`
    ///   can interleave and survive the sweep half-registered.
    pub fn cancel_all(&self) -> usize {
        let mut inner = self.lock();
        let count = inner.running.len();
        inner.current.clear();
        inner.epoch += 1;
        for (id, registration) in inner.running.drain() {
            registration.handle.abort();
            tracing::debug!(effect = ?id, "effect cancelled");
        }
        if count > 0 {
            tracing::info!(count, "cancelled all running effects");
        }
        count
    }

    /// Whether results tagged with `generation` should still be applied for `id`.
    #[must_use]
    pub fn is_current(&self, id: EffectId, generation: u64) -> bool {
        self.lock().current.get(&id) == Some(&generation)
    }

    /// Epoch a one-shot task spawned now belongs to.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Whether a one-shot result from `epoch` survived every `cancel_all` since.
    #[must_use]
    pub fn is_current_epoch(&self, epoch: u64) -> bool {
        self.lock().epoch == epoch
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn is_running(&self, id: EffectId) -> bool {
        self.lock().running.contains_key(&id)
    }

    /// Currently registered ids.
    #[must_use]
    pub fn active(&self) -> BTreeSet<EffectId> {
        self.lock().running.keys().copied().collect()
    }
}
