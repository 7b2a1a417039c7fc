//! Lock-free conversion counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Call, error and latency counters shared by every caller of one engine.
///
/// All updates are single atomic operations except the peak latency, which
/// is raised with a compare-and-retry loop and never decreases.
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    calls: AtomicU64,
    errors: AtomicU64,
    total_latency_ns: AtomicU64,
    peak_latency_ns: AtomicU64,
}

/// Point-in-time copy of [`AtomicMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub calls: u64,
    pub errors: u64,
    pub total_latency_ns: u64,
    pub peak_latency_ns: u64,
    pub average_latency_ns: u64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished call.
    pub fn record(&self, latency: Duration, ok: bool) {
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        self.total_latency_ns.fetch_add(nanos, Ordering::Relaxed);
        self.raise_peak(nanos);
    }

    /// Installs `nanos` as the peak unless a value ≥ `nanos` is already stored.
    fn raise_peak(&self, nanos: u64) {
        let mut current = self.peak_latency_ns.load(Ordering::Relaxed);
        while nanos > current {
            match self.peak_latency_ns.compare_exchange_weak(
                current,
                nanos,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let calls = self.calls.load(Ordering::Relaxed);
        let total_latency_ns = self.total_latency_ns.load(Ordering::Relaxed);
        MetricsSnapshot {
            calls,
            errors: self.errors.load(Ordering::Relaxed),
            total_latency_ns,
            peak_latency_ns: self.peak_latency_ns.load(Ordering::Relaxed),
            average_latency_ns: total_latency_ns.checked_div(calls).unwrap_or(0),
        }
    }

    /// Zeroes every counter. Calls racing with a reset may land on either side.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.total_latency_ns.store(0, Ordering::Relaxed);
        self.peak_latency_ns.store(0, Ordering::Relaxed);
    }
}
