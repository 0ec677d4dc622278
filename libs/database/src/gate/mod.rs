//! Admission gate: bounds how many store operations run at once.
//!
//! Callers acquire a [`GatePermit`] before touching the store and hold it for
//! the whole interaction (one statement or one transaction). Waiting for a
//! permit observes the caller's [`RequestContext`], so a cancelled or expired
//! request leaves the queue without ever being admitted.

mod config;
mod metrics;

pub use config::GateConfig;
pub use metrics::{GateMetrics, NoopGateMetrics};

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use crate::common::{ContextError, RequestContext};

#[derive(Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    metrics: Arc<dyn GateMetrics>,
}

impl std::fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("capacity", &self.capacity)
            .field("available", &self.available())
            .finish()
    }
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` concurrent holders.
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self::with_metrics(capacity, Arc::new(NoopGateMetrics))
    }

    pub fn with_metrics(capacity: usize, metrics: Arc<dyn GateMetrics>) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            metrics,
        }
    }

    pub fn from_config(config: GateConfig, metrics: Arc<dyn GateMetrics>) -> Self {
        Self::with_metrics(config.capacity, metrics)
    }

    /// Wait for a permit.
    ///
    /// Fails without touching the gate if `ctx` is already done. If `ctx`
    /// fires while waiting, the caller leaves the queue and nothing is held.
    pub async fn acquire(&self, ctx: &RequestContext) -> Result<GatePermit, ContextError> {
        ctx.check()?;

        let started = Instant::now();
        let permit = ctx
            .run(self.semaphore.clone().acquire_owned())
            .await?
            // Only a closed gate fails here; treat it like shutdown
            .map_err(|_| ContextError::Cancelled)?;

        let waited = started.elapsed();
        self.metrics.observe_wait(waited);
        self.metrics.increment_in_use();
        trace!(waited_us = waited.as_micros() as u64, "Gate permit acquired");

        Ok(GatePermit {
            _permit: permit,
            metrics: self.metrics.clone(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn in_use(&self) -> usize {
        self.capacity.saturating_sub(self.available())
    }

    /// Stop admitting. Queued and future callers fail with `Cancelled`;
    /// permits already held stay valid until dropped.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }
}

/// Proof of admission. Dropping it returns the slot to the gate.
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    metrics: Arc<dyn GateMetrics>,
}

impl std::fmt::Debug for GatePermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatePermit").finish_non_exhaustive()
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.metrics.decrement_in_use();
    }
}
