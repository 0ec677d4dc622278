//! Admission gate metrics.

use database::GateMetrics;
use metrics::{gauge, histogram};
use std::time::Duration;

use crate::{GATE_IN_USE, GATE_WAIT_DURATION};

/// Forwards gate telemetry to the global `metrics` recorder.
///
/// Without an installed recorder every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateMetricsRecorder;

impl GateMetrics for GateMetricsRecorder {
    fn observe_wait(&self, waited: Duration) {
        histogram!(GATE_WAIT_DURATION).record(waited.as_secs_f64());
    }

    fn increment_in_use(&self) {
        gauge!(GATE_IN_USE).increment(1.0);
    }

    fn decrement_in_use(&self) {
        gauge!(GATE_IN_USE).decrement(1.0);
    }
}
