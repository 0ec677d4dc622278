use database::GateMetrics;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Gate metrics sink that remembers what it saw
///
/// Share it with the gate through an `Arc` and read the counters after the
/// workload finishes. `peak()` is the highest number of permits ever held at
/// the same time.
#[derive(Debug, Default)]
pub struct RecordingGateMetrics {
    current: AtomicUsize,
    peak: AtomicUsize,
    acquisitions: AtomicUsize,
}

impl RecordingGateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl GateMetrics for RecordingGateMetrics {
    fn observe_wait(&self, _waited: Duration) {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_in_use(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn decrement_in_use(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}
