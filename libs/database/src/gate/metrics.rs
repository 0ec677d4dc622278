use std::time::Duration;

/// Sink for admission gate telemetry.
///
/// The gate reports how long each caller waited for a permit and how many
/// permits are currently held. Implementations must be cheap; they are called
/// on every store access.
pub trait GateMetrics: Send + Sync + 'static {
    /// Time spent waiting for a permit, recorded only for granted permits
    fn observe_wait(&self, waited: Duration);

    fn increment_in_use(&self);

    fn decrement_in_use(&self);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGateMetrics;

impl GateMetrics for NoopGateMetrics {
    fn observe_wait(&self, _waited: Duration) {}

    fn increment_in_use(&self) {}

    fn decrement_in_use(&self) {}
}
